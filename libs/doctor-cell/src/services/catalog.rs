use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use shared_models::ids::DoctorId;

use crate::models::{DirectoryError, DoctorRecord};

const BUILTIN_CATALOG: &str = include_str!("../../data/doctors.json");

/// The fixed, read-only list of doctors the directory searches over.
#[derive(Debug, Clone)]
pub struct Catalog {
    doctors: Vec<DoctorRecord>,
}

impl Catalog {
    pub fn new(doctors: Vec<DoctorRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(doctors.len());
        for doctor in &doctors {
            if !seen.insert(doctor.id) {
                return Err(DirectoryError::DuplicateId(doctor.id));
            }
        }

        Ok(Self { doctors })
    }

    /// Demo dataset compiled into the binary.
    pub fn builtin() -> Result<Self, DirectoryError> {
        let catalog = Self::from_json(BUILTIN_CATALOG)?;
        debug!("Loaded built-in catalog with {} doctors", catalog.len());
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, DirectoryError> {
        let doctors: Vec<DoctorRecord> = serde_json::from_str(raw)?;
        Self::new(doctors)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;
        info!("Loaded catalog from {} ({} doctors)", path.display(), catalog.len());
        Ok(catalog)
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    pub fn get(&self, id: DoctorId) -> Option<&DoctorRecord> {
        self.doctors.iter().find(|doctor| doctor.id == id)
    }

    pub fn require(&self, id: DoctorId) -> Result<&DoctorRecord, DirectoryError> {
        self.get(id).ok_or(DirectoryError::NotFound(id))
    }

    /// Unique specializations, sorted ascending.
    pub fn specializations(&self) -> Vec<String> {
        let mut specs: Vec<String> = self
            .doctors
            .iter()
            .map(|doctor| doctor.specialization.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        specs.sort();
        specs
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
