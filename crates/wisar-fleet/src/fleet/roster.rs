use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use super::domain::{Vehicle, VehicleCategory, VehicleId};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster file: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads fleet and driver rosters exported from the hosted store as CSV.
///
/// Vehicles use the headers `id,name,type,has_pump,last_test`; drivers a single `name` column.
pub struct RosterImporter;

impl RosterImporter {
    pub fn vehicles_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vehicle>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::vehicles_from_reader(file)
    }

    pub fn vehicles_from_reader<R: Read>(reader: R) -> Result<Vec<Vehicle>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut vehicles = Vec::new();
        for row in csv_reader.deserialize::<VehicleRow>() {
            vehicles.push(row?.into_vehicle());
        }
        Ok(vehicles)
    }

    pub fn drivers_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::drivers_from_reader(file)
    }

    pub fn drivers_from_reader<R: Read>(reader: R) -> Result<Vec<String>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut names = Vec::new();
        for row in csv_reader.deserialize::<DriverRow>() {
            if let Some(name) = row?.name {
                names.push(name);
            }
        }
        Ok(names)
    }
}

#[derive(Debug, Deserialize)]
struct VehicleRow {
    id: String,
    name: String,
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_pump: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_test: Option<String>,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: VehicleId(self.id),
            name: self.name,
            category: self
                .category
                .as_deref()
                .map(VehicleCategory::parse)
                .unwrap_or_default(),
            has_pump: self.has_pump.as_deref().is_some_and(parse_flag),
            last_test_date: self.last_test,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriverRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
