use crate::foreground::ForegroundMonitor;
use std::fmt::Debug;
use tracing::error;

/// A single operation the host can perform on the scheduler
#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Errors;

    async fn execute(
        &mut self,
        monitor: &ForegroundMonitor,
    ) -> Result<Self::Response, Self::Errors>;
}

#[tracing::instrument(name = "Executing usecase", skip(monitor))]
pub async fn execute<U>(mut usecase: U, monitor: &ForegroundMonitor) -> Result<U::Response, U::Errors>
where
    U: UseCase,
    U::Errors: Debug,
{
    let res = usecase.execute(monitor).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}
