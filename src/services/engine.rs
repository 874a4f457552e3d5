//! Simulated analysis engine.
//!
//! There is no model behind the demos: starting an analysis flips the view
//! to `Running`, waits a fixed delay on a tokio timer and then stores either
//! the canned tender result or a pseudo-random credit assessment. Runs are
//! never cancelled.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::views::SharedView;
use crate::domain::{
    credit, tender, AnalysisError, CreditForm, CreditResult, InputCollector, RandomSource,
    TenderInput, TenderResult,
};

/// Handle to an analysis in flight.
#[derive(Debug)]
pub struct AnalysisTicket {
    pub run: u64,
    /// Resolves to true when the result was stored on the view.
    pub handle: JoinHandle<bool>,
}

#[derive(Clone)]
pub struct SimulatedEngine {
    delay: Duration,
    rng: Arc<dyn RandomSource>,
}

impl SimulatedEngine {
    pub fn new(delay: Duration, rng: Arc<dyn RandomSource>) -> Self {
        Self { delay, rng }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the tender mock on `view`.
    pub fn start_tender(
        &self,
        view: &SharedView<TenderInput, TenderResult>,
    ) -> Result<AnalysisTicket, AnalysisError> {
        self.start(view, |file| tender::analyze(&file))
    }

    /// Start the credit mock on `view`.
    pub fn start_credit(
        &self,
        view: &SharedView<CreditForm, CreditResult>,
    ) -> Result<AnalysisTicket, AnalysisError> {
        let rng = Arc::clone(&self.rng);
        self.start(view, move |form| credit::assess(&form, rng.as_ref()))
    }

    /// Enter `Running` synchronously, then complete once after the delay.
    ///
    /// The timer task only keeps a weak reference: if the view has been
    /// evicted by the time it fires, the result is dropped.
    #[instrument(skip_all, fields(flow = I::FLOW, view_id = tracing::field::Empty))]
    pub fn start<I, R, F>(
        &self,
        view: &SharedView<I, R>,
        compute: F,
    ) -> Result<AnalysisTicket, AnalysisError>
    where
        I: InputCollector,
        R: Send + 'static,
        I: Send + 'static,
        F: FnOnce(I::Snapshot) -> R + Send + 'static,
    {
        let (view_id, run, snapshot) = {
            let mut guard = view.lock();
            tracing::Span::current().record("view_id", tracing::field::display(guard.id));

            if guard.analysis.is_running() {
                return Err(AnalysisError::AlreadyRunning);
            }
            let snapshot = guard.input.snapshot().ok_or(AnalysisError::NotReady)?;
            let run = guard.analysis.begin(true)?;
            guard.touch();
            (guard.id, run, snapshot)
        };

        info!(run, delay_ms = self.delay.as_millis() as u64, "Analysis started");

        let weak = Arc::downgrade(view);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = compute(snapshot);

            let Some(view) = weak.upgrade() else {
                debug!(
                    flow = I::FLOW,
                    view_id = %view_id,
                    run,
                    "View discarded before analysis finished"
                );
                return false;
            };

            let mut guard = view.lock();
            let stored = guard.analysis.complete(run, result);
            guard.touch();
            if stored {
                info!(flow = I::FLOW, view_id = %view_id, run, "Analysis completed");
            }
            stored
        });

        Ok(AnalysisTicket { run, handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::random::testing::ScriptedRandom;
    use crate::domain::{AnalysisState, CreditField, RiskLevel, SelectedFile, ThreadRandom};
    use crate::services::views::{CreditView, TenderView};
    use parking_lot::Mutex;
    use uuid::Uuid;

    const DELAY: Duration = Duration::from_millis(3000);

    fn engine(rng: impl RandomSource + 'static) -> SimulatedEngine {
        SimulatedEngine::new(DELAY, Arc::new(rng))
    }

    fn tender_view() -> SharedView<TenderInput, TenderResult> {
        Arc::new(Mutex::new(TenderView::new(Uuid::new_v4())))
    }

    fn credit_view(revenue: &str) -> SharedView<CreditForm, CreditResult> {
        let view = Arc::new(Mutex::new(CreditView::new(Uuid::new_v4())));
        view.lock().edit_input(|form| {
            form.set(CreditField::CompanyName, "Distribuidora Los Andes EIRL");
            form.set(CreditField::Sector, "comercio");
            form.set(CreditField::YearsInBusiness, "5");
            form.set(CreditField::MonthlyRevenue, revenue);
        });
        view
    }

    #[tokio::test(start_paused = true)]
    async fn tender_completes_exactly_after_delay() {
        let view = tender_view();
        view.lock()
            .edit_input(|input| input.set_file(SelectedFile::new("tender.pdf", 2 * 1024 * 1024)));

        let ticket = engine(ThreadRandom).start_tender(&view).unwrap();
        assert_eq!(ticket.run, 1);
        assert!(view.lock().analysis.is_running());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(view.lock().analysis.is_running());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let guard = view.lock();
        let result = guard.analysis.state().result().expect("completed");
        assert_eq!(result.document_type, "Licitación Pública de Infraestructura");
        assert_eq!(result.legal_compliance.value(), 92);
        assert_eq!(result.technical_compliance.value(), 85);
        assert_eq!(result.risk_level.label(), "Medio");
    }

    #[tokio::test(start_paused = true)]
    async fn start_without_input_is_rejected() {
        let view = tender_view();
        let err = engine(ThreadRandom).start_tender(&view).unwrap_err();
        assert_eq!(err, AnalysisError::NotReady);
        assert_eq!(view.lock().analysis.state(), &AnalysisState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_while_running_is_rejected() {
        let view = credit_view("15000");
        let engine = engine(ScriptedRandom::new([700, 80, 90, 75, 85]));

        let first = engine.start_credit(&view).unwrap();
        assert_eq!(
            engine.start_credit(&view).unwrap_err(),
            AnalysisError::AlreadyRunning
        );

        assert!(first.handle.await.unwrap());
        assert_eq!(view.lock().analysis.run(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn credit_result_uses_submitted_snapshot() {
        let view = credit_view("15000");
        let ticket = engine(ScriptedRandom::new([700, 80, 90, 75, 85]))
            .start_credit(&view)
            .unwrap();

        // edits while running do not reach the in-flight analysis
        view.lock()
            .edit_input(|form| form.set(CreditField::MonthlyRevenue, "100"));
        assert!(view.lock().analysis.is_running());

        assert!(ticket.handle.await.unwrap());
        let guard = view.lock();
        let result = guard.analysis.state().result().expect("completed");
        assert_eq!(result.credit_score, 700);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.approval_probability.value(), 65);
        assert_eq!(result.interest_rate, 18);
        assert_eq!(result.recommended_amount, Some(4500));
    }

    #[tokio::test(start_paused = true)]
    async fn evicted_view_drops_late_result() {
        let view = tender_view();
        view.lock()
            .edit_input(|input| input.set_file(SelectedFile::new("a.docx", 1)));

        let ticket = engine(ThreadRandom).start_tender(&view).unwrap();
        drop(view);

        assert!(!ticket.handle.await.unwrap());
    }
}
