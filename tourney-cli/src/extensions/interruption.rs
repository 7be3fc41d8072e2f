//! Interruption handler.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tourney::utils::{GenericResult, InterruptionQuota, Quota};

/// Creates a quota which is reached once the process receives an interruption signal.
pub fn create_interruption_quota() -> GenericResult<Arc<dyn Quota + Send + Sync>> {
    let quota = InterruptionQuota::new(Arc::new(AtomicBool::new(false)));

    ctrlc::set_handler({
        let quota = quota.clone();
        move || quota.interrupt()
    })
    .map_err(|err| format!("cannot set interruption handler: '{err}'"))?;

    Ok(Arc::new(quota))
}
