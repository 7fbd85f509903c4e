// Job Registry - authoritative set of jobs, keyed by id

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{Job, JobId, JobSnapshot, JobSpec};
use crate::error::{AppError, Result};

/// Owned by the request serializer for the engine's whole lifetime.
/// Workers only ever see the `Arc<Job>` handed to them through the work queue.
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: BTreeMap<JobId, Arc<Job>>,
}

impl JobRegistry {
    /// Build a registry from the configured job list (ids are 0-based positions)
    pub fn from_specs(specs: impl IntoIterator<Item = JobSpec>) -> Result<Self> {
        let mut registry = Self::default();
        for (position, spec) in specs.into_iter().enumerate() {
            spec.validate()?;
            registry.register(Job::new(position as JobId, spec))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, job: Job) -> Result<Arc<Job>> {
        let id = job.id();
        if self.jobs.contains_key(&id) {
            return Err(AppError::InvalidState(format!(
                "job {} registered twice",
                id
            )));
        }
        let job = Arc::new(job);
        self.jobs.insert(id, Arc::clone(&job));
        Ok(job)
    }

    pub fn get(&self, id: JobId) -> Option<&Arc<Job>> {
        self.jobs.get(&id)
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Arc<Job>> {
        self.jobs.values()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Snapshot of every job, ordered by id
    pub fn snapshot(&self) -> Vec<JobSnapshot> {
        self.jobs.values().map(|job| job.snapshot()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SortMode;

    #[test]
    fn test_ids_follow_configuration_order() {
        let registry = JobRegistry::from_specs(vec![
            JobSpec::new("bolsonaro", SortMode::New, 3),
            JobSpec::new("trump", SortMode::New, 3),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().query(), "bolsonaro");
        assert_eq!(registry.get(1).unwrap().query(), "trump");
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let result = JobRegistry::from_specs(vec![JobSpec::new("", SortMode::New, 3)]);
        assert!(matches!(result, Err(AppError::Domain(_))));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut registry = JobRegistry::default();
        registry
            .register(Job::new(1, JobSpec::new("a", SortMode::New, 3)))
            .unwrap();
        let result = registry.register(Job::new(1, JobSpec::new("b", SortMode::New, 3)));
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }
}
