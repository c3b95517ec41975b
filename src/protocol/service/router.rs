//! Task pumping the router's routing engine.
use crate::protocol::service::shutdown::Shutdown;
use crate::protocol::transport::traits::csp_stack::CspRouter;

pub struct RouterTask<R: CspRouter> {
    router: R,
}

impl<R: CspRouter> RouterTask<R> {
    pub fn new(router: R) -> Self {
        Self { router }
    }

    /// Drive the routing engine forever.
    pub async fn run(&mut self) -> ! {
        loop {
            self.router.route_work().await;
        }
    }

    /// Drive the routing engine until `shutdown` is seen between two passes.
    /// Returns the number of completed passes.
    pub async fn run_until(&mut self, shutdown: &Shutdown) -> usize {
        let mut passes = 0;
        while !shutdown.is_triggered() {
            self.router.route_work().await;
            passes += 1;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("csp router: stopped after {} passes", passes);
        passes
    }

    pub fn into_inner(self) -> R {
        self.router
    }
}
