use crate::workout::Workout;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("workout id already present: {0}")]
    DuplicateId(String),
}

/// Ordered collection of workouts. Insertion order is display order.
/// Records only ever enter via `append` or wholesale via `replace`
/// (hydration); individual removal is not a thing in this app.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout, guarding against id collisions. Ids are generated
    /// collision-resistant, so a duplicate here is a programmer error; the
    /// store is left unchanged if it ever happens.
    pub fn append(&mut self, workout: Workout) -> Result<&Workout, StoreError> {
        if self.find_by_id(workout.id()).is_some() {
            return Err(StoreError::DuplicateId(workout.id().to_string()));
        }
        let idx = self.workouts.len();
        self.workouts.push(workout);
        Ok(&self.workouts[idx])
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Used only by the explicit reset operation.
    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    /// Bulk-set the contents during hydration. Rejects input carrying
    /// duplicate ids and leaves the current contents untouched in that case.
    pub fn replace(&mut self, records: Vec<Workout>) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(StoreError::DuplicateId(record.id().to_string()));
            }
        }
        self.workouts = records;
        Ok(())
    }
}
