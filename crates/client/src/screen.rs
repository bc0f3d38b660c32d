//! Screen-level glue: list controllers and form submission.
//!
//! A [`ListController`] owns one screen's fetched records and its
//! filter/sort/page state. [`submit`] validates a form, makes exactly one
//! backend call, and clears the form only if the call succeeded.

use std::future::Future;
use std::num::NonZeroUsize;

use dairy_ledger_core::listing::{Searchable, Sortable};
use dairy_ledger_core::{Form, ListState, Measured, PageView, Totals};
use tracing::warn;

use crate::error::ClientError;
use crate::snapshot::{Fetched, Freshness};

/// Validate `form`, then hand the payload to `call`.
///
/// A validation failure returns before `call` is invoked. On success the
/// form is reset to its initial state; on any failure it is left as typed.
///
/// # Errors
///
/// Returns the validation error or whatever `call` failed with.
pub async fn submit<F, C, Fut, R>(form: &mut F, call: C) -> Result<R, ClientError>
where
    F: Form,
    C: FnOnce(F::Payload) -> Fut,
    Fut: Future<Output = Result<R, ClientError>>,
{
    let payload = form.validate()?;
    let result = call(payload).await?;
    form.reset();
    Ok(result)
}

/// Records and list state for one screen.
#[derive(Debug, Clone)]
pub struct ListController<T> {
    records: Vec<T>,
    state: ListState,
    freshness: Freshness,
}

impl<T> ListController<T>
where
    T: Searchable + Sortable,
{
    /// Empty list with the given page size.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            records: Vec::new(),
            state: ListState::new(page_size),
            freshness: Freshness::Live,
        }
    }

    /// Replace the records with the result of `fetch`.
    ///
    /// On failure the previous records stay in place.
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn refresh<Fut>(&mut self, fetch: Fut) -> Result<(), ClientError>
    where
        Fut: Future<Output = Result<Vec<T>, ClientError>>,
    {
        self.records = fetch.await?;
        self.freshness = Freshness::Live;
        Ok(())
    }

    /// Take records produced by a snapshot-aware fetch.
    pub fn load(&mut self, fetched: Fetched<T>) {
        self.records = fetched.records;
        self.freshness = fetched.freshness;
    }

    /// Submit `form` through `call` and, if it succeeded, refetch.
    ///
    /// A failed refetch after a successful call is logged and the stale
    /// records are kept; the call's result is still returned.
    ///
    /// # Errors
    ///
    /// Returns the validation error or whatever `call` failed with.
    pub async fn submit_and_refresh<F, C, Fut, R, RFut>(
        &mut self,
        form: &mut F,
        call: C,
        refetch: RFut,
    ) -> Result<R, ClientError>
    where
        F: Form,
        C: FnOnce(F::Payload) -> Fut,
        Fut: Future<Output = Result<R, ClientError>>,
        RFut: Future<Output = Result<Vec<T>, ClientError>>,
    {
        let result = submit(form, call).await?;
        if let Err(e) = self.refresh(refetch).await {
            warn!(error = %e, "Refetch after submit failed");
        }
        Ok(result)
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub const fn freshness(&self) -> Freshness {
        self.freshness
    }

    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Filter/sort/page controls.
    pub fn state_mut(&mut self) -> &mut ListState {
        &mut self.state
    }

    /// The visible page under the current state.
    pub fn view(&mut self) -> PageView<'_, T> {
        self.state.view(&self.records)
    }

    /// Totals over the filtered records, not just the visible page.
    pub fn totals(&mut self) -> Totals
    where
        T: Measured,
    {
        Totals::of_view(&self.view())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::cell::Cell;

    use dairy_ledger_core::forms::{AddressForm, CustomerForm};
    use dairy_ledger_core::{Payment, SortKey};

    use super::*;
    use crate::error::TransportKind;

    fn payments(n: usize) -> Vec<Payment> {
        (1..=n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i,
                    "customer_id": i,
                    "customer_name": format!("Customer {i}"),
                    "phone": format!("98{i:08}"),
                    "amount": "100",
                    "method": "Cash",
                    "status": if i % 2 == 0 { "Paid" } else { "Pending" },
                    "created_at": format!("2024-06-{i:02}"),
                }))
                .unwrap()
            })
            .collect()
    }

    fn page_size() -> NonZeroUsize {
        NonZeroUsize::new(5).unwrap()
    }

    #[tokio::test]
    async fn test_submit_validation_failure_skips_call() {
        let calls = Cell::new(0);
        let counter = &calls;
        let mut form = CustomerForm {
            contact: "987654321".into(),
            name: "Asha".into(),
            ..CustomerForm::default()
        };
        let err = submit(&mut form, move |_| async move {
            counter.set(counter.get() + 1);
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(calls.get(), 0);
        assert_eq!(form.contact, "987654321");
    }

    #[tokio::test]
    async fn test_submit_resets_only_on_success() {
        let mut form = AddressForm {
            label: "Kothrud".into(),
        };
        let err = submit(&mut form, |_| async {
            Err::<(), _>(ClientError::Api("Address exists".into()))
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Address exists");
        assert_eq!(form.label, "Kothrud");

        let sent = submit(&mut form, |input| async move { Ok(input.label) })
            .await
            .unwrap();
        assert_eq!(sent, "Kothrud");
        assert_eq!(form, AddressForm::default());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_records() {
        let mut list = ListController::new(page_size());
        list.refresh(async { Ok(payments(3)) }).await.unwrap();
        let err = list
            .refresh(async {
                Err(ClientError::Transport {
                    kind: TransportKind::Timeout,
                    detail: "timed out".into(),
                })
            })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(list.records().len(), 3);
    }

    #[tokio::test]
    async fn test_totals_cover_filtered_set() {
        let mut list = ListController::new(page_size());
        list.refresh(async { Ok(payments(12)) }).await.unwrap();
        list.state_mut().set_filter("pending");
        let totals = list.totals();
        assert_eq!(totals.count, 6);
        assert_eq!(totals.amount, 600.0);
        assert_eq!(list.view().items().len(), 5);
    }

    #[tokio::test]
    async fn test_submit_and_refresh_refetches() {
        let mut list = ListController::<Payment>::new(page_size());
        let mut form = AddressForm {
            label: "Baner".into(),
        };
        list.submit_and_refresh(&mut form, |_| async { Ok(()) }, async { Ok(payments(7)) })
            .await
            .unwrap();
        list.state_mut()
            .set_sort(Some(dairy_ledger_core::Sort::descending(SortKey::Date)));
        let view = list.view();
        assert_eq!(view.total_count(), 7);
        assert_eq!(view.items().first().unwrap().customer_name, "Customer 7");
    }
}
