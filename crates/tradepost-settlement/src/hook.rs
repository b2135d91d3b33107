//! Payment hook: the seam where foreign code runs mid-settlement.
//!
//! When a buy pays a seller, the marketplace hands the [`Payment`] to the
//! installed hook. The hook may answer with follow-up commands, which run
//! immediately on behalf of the payee, before the listing is cleared and
//! before ownership moves. This models token-received callbacks: it is the
//! only way another component's code can re-enter the engine.

use tradepost_types::{AccountId, Amount, Command, ItemId};

/// A currency movement made by settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment {
    pub item: ItemId,
    pub payer: AccountId,
    pub payee: AccountId,
    pub amount: Amount,
}

/// Receives settlement payments.
pub trait PaymentHook {
    /// Called once per settled payment. Returned commands execute with the
    /// payee as caller; any failure aborts the whole buy.
    fn on_payment(&mut self, payment: &Payment) -> Vec<Command>;
}

impl<F> PaymentHook for F
where
    F: FnMut(&Payment) -> Vec<Command>,
{
    fn on_payment(&mut self, payment: &Payment) -> Vec<Command> {
        self(payment)
    }
}
