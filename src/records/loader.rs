//! Load exposure records from the claims dataset CSV

use super::{ExposureRecord, Region, Sex};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the claims dataset columns
///
/// Categorical fields arrive integer-coded; conversion to the domain type
/// validates them.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    age: u32,
    sex: u8,
    bmi: f64,
    children: u32,
    smoker: u8,
    region: u8,
    charges: f64,
    #[serde(rename = "insuranceclaim")]
    insurance_claim: u8,
}

impl CsvRow {
    fn to_record(self) -> Result<ExposureRecord, Box<dyn Error>> {
        let sex = Sex::from_code(self.sex)?;
        let region = Region::from_code(self.region)?;

        let smoker = match self.smoker {
            0 => false,
            1 => true,
            other => return Err(format!("Unknown smoker flag: {}", other).into()),
        };

        let claim = match self.insurance_claim {
            0 => false,
            1 => true,
            other => return Err(format!("Unknown insuranceclaim flag: {}", other).into()),
        };

        let record = ExposureRecord {
            age: self.age,
            sex,
            bmi: self.bmi,
            children: self.children,
            smoker,
            region,
            charges: self.charges,
            claim,
        };
        record.validate()?;
        Ok(record)
    }
}

/// Load all exposure records from a CSV file
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<ExposureRecord>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record()?);
    }

    Ok(records)
}

/// Load records from any reader (e.g., string buffer, upload stream)
pub fn load_records_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ExposureRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record()?);
    }

    Ok(records)
}
