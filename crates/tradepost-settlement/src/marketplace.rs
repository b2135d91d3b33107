//! The settlement core: one value owning every piece of ledger state.
//!
//! Callers reach the Item Registry, the Currency Ledger, and the listing
//! book only through [`Marketplace`]. Single-component operations check
//! before they write, so they are atomic on their own. `buy_item` spans all
//! three components and runs foreign hook code midway; it takes a
//! checkpoint first and restores it on any failure.

use tradepost_ledger::CurrencyLedger;
use tradepost_registry::ItemRegistry;
use tradepost_types::{
    AccountId, Amount, Command, EventLog, ItemId, Listing, ListingState, MarketConfig,
    MarketEvent, Outcome, Result, Role, TradepostError,
};

use crate::digest::compute_state_digest;
use crate::hook::{Payment, PaymentHook};
use crate::listing_book::ListingBook;
use crate::reentrancy::ReentrancyGuard;
use crate::snapshot::{AccountBalance, ItemOwnership, MarketSnapshot};

/// State restored when a settlement fails.
///
/// A full copy of the registry, ledger, and listing book, so taking one is
/// O(total state). Hook calls may write any key, not only the ones
/// `settle` touches.
// TODO: replace with an undo journal recorded by the leaf mutators once the
// registry and ledger expose one.
struct Checkpoint {
    registry: ItemRegistry,
    ledger: CurrencyLedger,
    listings: ListingBook,
    event_len: usize,
}

/// Item registry + currency ledger + listing book behind one set of entry
/// points.
pub struct Marketplace {
    config: MarketConfig,
    registry: ItemRegistry,
    ledger: CurrencyLedger,
    listings: ListingBook,
    events: EventLog,
    guard: ReentrancyGuard,
    payment_hook: Option<Box<dyn PaymentHook>>,
}

impl Marketplace {
    /// Start a market at genesis.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` fails validation.
    pub fn new(config: MarketConfig) -> Result<Self> {
        config.validate()?;
        let ledger = CurrencyLedger::new(config.genesis_admin);
        tracing::info!(
            symbol = %config.currency.symbol,
            admin = %config.genesis_admin,
            engine = %config.engine_account,
            "Market initialised"
        );
        Ok(Self {
            config,
            registry: ItemRegistry::new(),
            ledger,
            listings: ListingBook::new(),
            events: EventLog::new(),
            guard: ReentrancyGuard::new(),
            payment_hook: None,
        })
    }

    #[must_use]
    pub fn with_payment_hook(mut self, hook: impl PaymentHook + 'static) -> Self {
        self.payment_hook = Some(Box::new(hook));
        self
    }

    /// Install (or remove) the hook notified when settlement pays a seller.
    pub fn set_payment_hook(&mut self, hook: Option<Box<dyn PaymentHook>>) {
        self.payment_hook = hook;
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The spender identity buyers must approve.
    #[must_use]
    pub fn engine_account(&self) -> AccountId {
        self.config.engine_account
    }

    pub fn owner_of(&self, item: ItemId) -> Result<AccountId> {
        self.registry.owner_of(item)
    }

    #[must_use]
    pub fn items_of(&self, owner: AccountId) -> Vec<ItemId> {
        self.registry.items_of(owner)
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.registry.item_count()
    }

    #[must_use]
    pub fn listing(&self, item: ItemId) -> Option<&Listing> {
        self.listings.get(item)
    }

    #[must_use]
    pub fn listing_state(&self, item: ItemId) -> ListingState {
        self.listings.state(item)
    }

    /// Active listings, ascending by item.
    #[must_use]
    pub fn active_listings(&self) -> Vec<&Listing> {
        self.listings.iter().collect()
    }

    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    #[must_use]
    pub fn has_role(&self, account: AccountId, role: Role) -> bool {
        self.ledger.has_role(account, role)
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    #[must_use]
    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ledger(&self) -> &CurrencyLedger {
        &self.ledger
    }

    /// See [`CurrencyLedger::verify_supply`].
    pub fn verify_supply(&self) -> Result<()> {
        self.ledger.verify_supply()
    }

    /// Deterministic hash of all ledger state (see [`compute_state_digest`]).
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        compute_state_digest(&self.registry, &self.ledger, &self.listings)
    }

    #[must_use]
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            item_count: self.registry.item_count(),
            owners: self
                .registry
                .iter()
                .map(|(item, owner)| ItemOwnership { item, owner })
                .collect(),
            listings: self.listings.iter().cloned().collect(),
            balances: self
                .ledger
                .balances()
                .map(|(account, balance)| AccountBalance { account, balance })
                .collect(),
            total_supply: self.ledger.total_supply(),
            event_count: self.events.len(),
            digest: hex::encode(self.state_digest()),
        }
    }

    // =================================================================
    // Item Registry entry points
    // =================================================================

    /// Mint a new item owned by `caller`.
    pub fn mint_item(&mut self, caller: AccountId) -> ItemId {
        let item = self.registry.mint(caller);
        self.events.record(MarketEvent::ItemMinted {
            item,
            owner: caller,
        });
        item
    }

    /// Owner-initiated transfer. Any listing on the item is dropped, since
    /// its seller no longer owns it.
    ///
    /// # Errors
    /// - `NotFound` if the item was never minted
    /// - `NotOwner` if `caller` does not own it
    pub fn transfer_item(&mut self, caller: AccountId, to: AccountId, item: ItemId) -> Result<()> {
        self.registry.transfer(caller, to, item)?;
        self.events.record(MarketEvent::ItemTransferred {
            item,
            from: caller,
            to,
        });
        if self.listings.clear(item).is_some() {
            tracing::debug!(item = %item, "Listing dropped after owner transfer");
            self.events.record(MarketEvent::SaleCancelled { item });
        }
        Ok(())
    }

    // =================================================================
    // Listing & Settlement entry points
    // =================================================================

    /// Offer `item` for sale at `price`. Re-listing replaces the price.
    ///
    /// # Errors
    /// - `ReentrantCall` during a settlement
    /// - `NotFound` if the item was never minted
    /// - `NotOwner` if `caller` does not own the item
    /// - `InvalidPrice` if `price` is zero
    pub fn list_item(&mut self, caller: AccountId, item: ItemId, price: Amount) -> Result<()> {
        self.guard.check()?;
        self.require_owner(caller, item)?;
        self.listings.list(item, price, caller)?;
        self.events.record(MarketEvent::SaleListed {
            item,
            price,
            seller: caller,
        });
        tracing::info!(item = %item, price, seller = %caller.short(), "Item listed");
        Ok(())
    }

    /// Withdraw the listing for `item`.
    ///
    /// # Errors
    /// - `ReentrantCall` during a settlement
    /// - `NotFound` / `NotOwner` as for [`Self::list_item`]
    /// - `NotListed` if there is no listing
    pub fn cancel_listing(&mut self, caller: AccountId, item: ItemId) -> Result<()> {
        self.guard.check()?;
        self.require_owner(caller, item)?;
        self.listings.cancel(item)?;
        self.events.record(MarketEvent::SaleCancelled { item });
        tracing::info!(item = %item, seller = %caller.short(), "Listing cancelled");
        Ok(())
    }

    /// Buy a listed item: currency moves buyer → seller, the listing is
    /// cleared, ownership moves seller → buyer. All or nothing.
    ///
    /// Each call copies the full market state up front for rollback, so its
    /// cost grows with the number of items, balances, and allowances.
    ///
    /// # Errors
    /// - `ReentrantCall` if a settlement is already running
    /// - `NotListed` if the item has no (current) listing
    /// - `SelfPurchase` if `caller` owns the item
    /// - `InsufficientBalance` / `InsufficientAllowance` if the buyer cannot pay
    /// - anything a payment-hook call fails with
    pub fn buy_item(&mut self, caller: AccountId, item: ItemId) -> Result<()> {
        self.guard.enter()?;
        let checkpoint = self.checkpoint();

        let result = self.settle(caller, item);
        if let Err(err) = &result {
            self.restore(checkpoint);
            tracing::warn!(item = %item, buyer = %caller.short(), error = %err, "Buy rolled back");
        }

        self.guard.exit();
        result
    }

    fn settle(&mut self, buyer: AccountId, item: ItemId) -> Result<()> {
        // 1. Listed?
        let listing = self
            .listings
            .get(item)
            .cloned()
            .ok_or(TradepostError::NotListed(item))?;

        // 2. Seller is the current owner, and not the buyer.
        let seller = self.registry.owner_of(item)?;
        if buyer == seller {
            return Err(TradepostError::SelfPurchase {
                account: buyer,
                item,
            });
        }
        if !listing.is_held_by(seller) {
            tracing::warn!(
                item = %item,
                listed_by = %listing.seller,
                owner = %seller,
                "Stale listing: seller no longer owns the item"
            );
            return Err(TradepostError::NotListed(item));
        }
        let price = listing.price;

        // 3-4. Buyer can pay, and has authorised the engine to take payment.
        let balance = self.ledger.balance_of(buyer);
        if balance < price {
            return Err(TradepostError::InsufficientBalance {
                needed: price,
                available: balance,
            });
        }
        let engine = self.config.engine_account;
        let allowance = self.ledger.allowance(buyer, engine);
        if allowance < price {
            return Err(TradepostError::InsufficientAllowance {
                needed: price,
                available: allowance,
            });
        }

        // 5. Currency first.
        self.ledger.transfer_from(engine, buyer, seller, price)?;
        self.events.record(MarketEvent::CurrencyTransferred {
            from: Some(buyer),
            to: Some(seller),
            amount: price,
        });
        self.notify_payment(&Payment {
            item,
            payer: buyer,
            payee: seller,
            amount: price,
        })?;

        // 6. Then the listing.
        self.listings.clear(item);

        // 7. Then ownership.
        self.registry.transfer(seller, buyer, item)?;
        self.events.record(MarketEvent::ItemTransferred {
            item,
            from: seller,
            to: buyer,
        });

        // 8. Announce.
        self.events.record(MarketEvent::SaleCompleted {
            item,
            price,
            seller,
            buyer,
        });
        tracing::info!(
            item = %item,
            price,
            seller = %seller.short(),
            buyer = %buyer.short(),
            "Sale completed"
        );
        Ok(())
    }

    fn notify_payment(&mut self, payment: &Payment) -> Result<()> {
        let Some(mut hook) = self.payment_hook.take() else {
            return Ok(());
        };
        let calls = hook.on_payment(payment);
        self.payment_hook = Some(hook);

        for command in calls {
            tracing::debug!(
                payee = %payment.payee.short(),
                op = command.name(),
                listing_op = command.is_listing_operation(),
                "Running payment-hook call"
            );
            self.execute(payment.payee, command)?;
        }
        Ok(())
    }

    fn require_owner(&self, caller: AccountId, item: ItemId) -> Result<()> {
        if self.registry.owner_of(item)? == caller {
            Ok(())
        } else {
            Err(TradepostError::NotOwner {
                account: caller,
                item,
            })
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            registry: self.registry.clone(),
            ledger: self.ledger.clone(),
            listings: self.listings.clone(),
            event_len: self.events.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.registry = checkpoint.registry;
        self.ledger = checkpoint.ledger;
        self.listings = checkpoint.listings;
        self.events.rollback_to(checkpoint.event_len);
    }

    // =================================================================
    // Currency Ledger entry points
    // =================================================================

    /// Let `spender` move up to `amount` of the caller's currency.
    pub fn approve(&mut self, caller: AccountId, spender: AccountId, amount: Amount) {
        self.ledger.approve(caller, spender, amount);
        self.events.record(MarketEvent::Approval {
            owner: caller,
            spender,
            amount,
        });
    }

    /// Send the caller's own currency.
    pub fn transfer(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.ledger.transfer(caller, to, amount)?;
        self.events.record(MarketEvent::CurrencyTransferred {
            from: Some(caller),
            to: Some(to),
            amount,
        });
        Ok(())
    }

    /// Spend `owner`'s currency under the caller's allowance.
    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.ledger.transfer_from(caller, owner, to, amount)?;
        self.events.record(MarketEvent::CurrencyTransferred {
            from: Some(owner),
            to: Some(to),
            amount,
        });
        Ok(())
    }

    /// Moderator-only currency issuance.
    pub fn mint_currency(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.ledger.mint(caller, to, amount)?;
        self.events.record(MarketEvent::CurrencyTransferred {
            from: None,
            to: Some(to),
            amount,
        });
        Ok(())
    }

    /// Moderator-only forced burn.
    pub fn burn_from(&mut self, caller: AccountId, account: AccountId, amount: Amount) -> Result<()> {
        self.ledger.burn_from(caller, account, amount)?;
        self.events.record(MarketEvent::CurrencyTransferred {
            from: Some(account),
            to: None,
            amount,
        });
        Ok(())
    }

    /// Admin-only. Returns `true` if the grant is new.
    pub fn grant_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<bool> {
        let changed = self.ledger.grant_role(caller, role, account)?;
        if changed {
            self.events.record(MarketEvent::RoleGranted {
                role,
                account,
                sender: caller,
            });
            tracing::info!(role = %role, account = %account, sender = %caller, "Role granted");
        }
        Ok(changed)
    }

    /// Admin-only. Returns `true` if a grant was removed.
    pub fn revoke_role(&mut self, caller: AccountId, role: Role, account: AccountId) -> Result<bool> {
        let changed = self.ledger.revoke_role(caller, role, account)?;
        if changed {
            self.events.record(MarketEvent::RoleRevoked {
                role,
                account,
                sender: caller,
            });
            tracing::info!(role = %role, account = %account, sender = %caller, "Role revoked");
        }
        Ok(changed)
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(&mut self, caller: AccountId, role: Role) -> bool {
        let changed = self.ledger.renounce_role(caller, role);
        if changed {
            self.events.record(MarketEvent::RoleRevoked {
                role,
                account: caller,
                sender: caller,
            });
            tracing::info!(role = %role, account = %caller, "Role renounced");
        }
        changed
    }

    // =================================================================
    // Command dispatch
    // =================================================================

    /// Run one command as `caller`.
    pub fn execute(&mut self, caller: AccountId, command: Command) -> Result<Outcome> {
        match command {
            Command::MintItem => Ok(Outcome::Minted(self.mint_item(caller))),
            Command::TransferItem { to, item } => {
                self.transfer_item(caller, to, item).map(|()| Outcome::Applied)
            }
            Command::ListItem { item, price } => {
                self.list_item(caller, item, price).map(|()| Outcome::Applied)
            }
            Command::CancelListing { item } => {
                self.cancel_listing(caller, item).map(|()| Outcome::Applied)
            }
            Command::BuyItem { item } => self.buy_item(caller, item).map(|()| Outcome::Applied),
            Command::Approve { spender, amount } => {
                self.approve(caller, spender, amount);
                Ok(Outcome::Applied)
            }
            Command::Transfer { to, amount } => {
                self.transfer(caller, to, amount).map(|()| Outcome::Applied)
            }
            Command::TransferFrom { owner, to, amount } => self
                .transfer_from(caller, owner, to, amount)
                .map(|()| Outcome::Applied),
            Command::MintCurrency { to, amount } => {
                self.mint_currency(caller, to, amount).map(|()| Outcome::Applied)
            }
            Command::BurnFrom { account, amount } => {
                self.burn_from(caller, account, amount).map(|()| Outcome::Applied)
            }
            Command::GrantRole { role, account } => {
                self.grant_role(caller, role, account).map(Outcome::RoleChanged)
            }
            Command::RevokeRole { role, account } => {
                self.revoke_role(caller, role, account).map(Outcome::RoleChanged)
            }
            Command::RenounceRole { role } => {
                Ok(Outcome::RoleChanged(self.renounce_role(caller, role)))
            }
        }
    }
}
