use std::sync::Arc;

use storage::{
    dto::allocation::AllocationSummary,
    services::{AllocationEngine, AllocationError, ResultSnapshot},
};

/// Recompute admissions from current data and publish the results
pub async fn trigger_allocation(
    engine: &AllocationEngine,
) -> Result<(AllocationSummary, Arc<ResultSnapshot>), AllocationError> {
    engine.run().await
}

/// Results of the last completed allocation run
pub fn latest_results(engine: &AllocationEngine) -> Arc<ResultSnapshot> {
    engine.latest()
}
