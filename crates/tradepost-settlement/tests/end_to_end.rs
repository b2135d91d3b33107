//! End-to-end integration tests across the registry, ledger, and engine.
//!
//! Each test drives a [`Marketplace`] through its public entry points only
//! and checks the observable outcome: owners, balances, allowances, listing
//! state, and emitted events. Rejected operations are checked against the
//! state digest taken before the call.

use tradepost_settlement::Marketplace;
use tradepost_types::*;

/// Helper: a market with named participants.
struct Scenario {
    market: Marketplace,
    admin: AccountId,
    engine: AccountId,
}

impl Scenario {
    fn new() -> Self {
        let cfg = MarketConfig::dummy();
        let admin = cfg.genesis_admin;
        let engine = cfg.engine_account;
        Self {
            market: Marketplace::new(cfg).expect("dummy config is valid"),
            admin,
            engine,
        }
    }

    fn fund(&mut self, account: AccountId, amount: Amount) {
        self.market
            .mint_currency(self.admin, account, amount)
            .expect("admin holds the moderator role");
    }

    fn approve_engine(&mut self, account: AccountId, amount: Amount) {
        self.market.approve(account, self.engine, amount);
    }

    fn mint_and_list(&mut self, seller: AccountId, price: Amount) -> ItemId {
        let item = self.market.mint_item(seller);
        self.market
            .list_item(seller, item, price)
            .expect("owner can list");
        item
    }

    /// Run `op` and assert it failed with `expected` without touching state.
    fn assert_rejected<F>(&mut self, expected: &TradepostError, op: F)
    where
        F: FnOnce(&mut Marketplace) -> Result<()>,
    {
        let digest = self.market.state_digest();
        let events = self.market.events().len();
        let err = op(&mut self.market).expect_err("operation should be rejected");
        assert_eq!(&err, expected);
        assert_eq!(self.market.state_digest(), digest, "state changed on {err}");
        assert_eq!(self.market.events().len(), events);
    }
}

fn alice() -> AccountId {
    AccountId::named("alice")
}

fn bob() -> AccountId {
    AccountId::named("bob")
}

fn carol() -> AccountId {
    AccountId::named("carol")
}

// =========================================================================
// Test 1: The basic sale
// =========================================================================

#[test]
fn alice_sells_to_bob() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 100);
    s.fund(bob(), 150);
    s.approve_engine(bob(), 100);
    let first_sale_event = s.market.events().len();

    s.market.buy_item(bob(), item).unwrap();

    assert_eq!(s.market.owner_of(item).unwrap(), bob());
    assert_eq!(s.market.balance_of(alice()), 100);
    assert_eq!(s.market.balance_of(bob()), 50);
    assert_eq!(s.market.allowance(bob(), s.engine), 0);
    assert_eq!(s.market.listing_state(item), ListingState::Unlisted);
    assert_eq!(s.market.total_supply(), 150);

    let emitted: Vec<&MarketEvent> = s
        .market
        .events()
        .since(first_sale_event as u64)
        .iter()
        .map(|r| &r.event)
        .collect();
    assert_eq!(
        emitted,
        vec![
            &MarketEvent::CurrencyTransferred {
                from: Some(bob()),
                to: Some(alice()),
                amount: 100,
            },
            &MarketEvent::ItemTransferred {
                item,
                from: alice(),
                to: bob(),
            },
            &MarketEvent::SaleCompleted {
                item,
                price: 100,
                seller: alice(),
                buyer: bob(),
            },
        ]
    );
    s.market.verify_supply().unwrap();
}

#[test]
fn buyer_can_resell() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 100);
    s.fund(bob(), 100);
    s.approve_engine(bob(), 100);
    s.market.buy_item(bob(), item).unwrap();

    s.market.list_item(bob(), item, 80).unwrap();
    s.fund(carol(), 80);
    s.approve_engine(carol(), 80);
    s.market.buy_item(carol(), item).unwrap();

    assert_eq!(s.market.owner_of(item).unwrap(), carol());
    assert_eq!(s.market.balance_of(alice()), 100);
    assert_eq!(s.market.balance_of(bob()), 80);
    assert_eq!(s.market.balance_of(carol()), 0);
    s.market.verify_supply().unwrap();
}

// =========================================================================
// Test 2: Rejected buys leave no trace
// =========================================================================

#[test]
fn self_purchase_rejected() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 10);
    s.fund(alice(), 10);
    s.approve_engine(alice(), 10);
    let expected = TradepostError::SelfPurchase {
        account: alice(),
        item,
    };
    s.assert_rejected(&expected, |m| m.buy_item(alice(), item));
}

#[test]
fn missing_allowance_rejected() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 100);
    s.fund(bob(), 100);
    s.approve_engine(bob(), 99);
    let expected = TradepostError::InsufficientAllowance {
        needed: 100,
        available: 99,
    };
    s.assert_rejected(&expected, |m| m.buy_item(bob(), item));
    assert_eq!(s.market.owner_of(item).unwrap(), alice());
}

#[test]
fn missing_balance_rejected() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 100);
    s.fund(bob(), 40);
    s.approve_engine(bob(), 100);
    let expected = TradepostError::InsufficientBalance {
        needed: 100,
        available: 40,
    };
    s.assert_rejected(&expected, |m| m.buy_item(bob(), item));
}

#[test]
fn allowance_for_wrong_spender_is_useless() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 10);
    s.fund(bob(), 10);
    s.market.approve(bob(), carol(), 10);
    let expected = TradepostError::InsufficientAllowance {
        needed: 10,
        available: 0,
    };
    s.assert_rejected(&expected, |m| m.buy_item(bob(), item));
}

#[test]
fn unminted_item_not_found() {
    let mut s = Scenario::new();
    s.assert_rejected(&TradepostError::NotFound(ItemId(7)), |m| {
        m.owner_of(ItemId(7)).map(|_| ())
    });
    s.assert_rejected(&TradepostError::NotFound(ItemId(7)), |m| {
        m.list_item(alice(), ItemId(7), 1)
    });
    s.assert_rejected(&TradepostError::NotFound(ItemId(7)), |m| {
        m.transfer_item(alice(), bob(), ItemId(7))
    });
}

// =========================================================================
// Test 3: Listing lifecycle
// =========================================================================

#[test]
fn list_and_cancel_round_trip() {
    let mut s = Scenario::new();
    let item = s.market.mint_item(alice());
    let before = s.market.state_digest();

    s.market.list_item(alice(), item, 25).unwrap();
    assert_eq!(
        s.market.listing_state(item),
        ListingState::Listed {
            price: 25,
            seller: alice()
        }
    );
    s.market.cancel_listing(alice(), item).unwrap();

    assert_eq!(s.market.state_digest(), before);
    assert_eq!(
        s.market.events().last(),
        Some(&MarketEvent::SaleCancelled { item })
    );
}

#[test]
fn relisting_updates_price() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 25);
    s.market.list_item(alice(), item, 40).unwrap();
    assert_eq!(s.market.listing(item).map(|l| l.price), Some(40));
    assert_eq!(s.market.active_listings().len(), 1);
}

#[test]
fn transfer_clears_listing() {
    let mut s = Scenario::new();
    let item = s.mint_and_list(alice(), 10);
    s.fund(bob(), 10);
    s.approve_engine(bob(), 10);

    s.market.transfer_item(alice(), carol(), item).unwrap();
    assert_eq!(s.market.owner_of(item).unwrap(), carol());
    assert!(s.market.listing(item).is_none());

    s.assert_rejected(&TradepostError::NotListed(item), |m| {
        m.buy_item(bob(), item)
    });
    assert_eq!(s.market.balance_of(bob()), 10);
}

#[test]
fn non_owner_cannot_transfer_or_list() {
    let mut s = Scenario::new();
    let item = s.market.mint_item(alice());
    let expected = TradepostError::NotOwner {
        account: bob(),
        item,
    };
    s.assert_rejected(&expected, |m| m.transfer_item(bob(), carol(), item));
    s.assert_rejected(&expected, |m| m.list_item(bob(), item, 5));
}

// =========================================================================
// Test 4: Roles
// =========================================================================

#[test]
fn non_moderator_cannot_mint() {
    let mut s = Scenario::new();
    let expected = TradepostError::Unauthorized {
        account: bob(),
        role: Role::Moderator,
    };
    s.assert_rejected(&expected, |m| m.mint_currency(bob(), bob(), 1_000));
    assert_eq!(s.market.total_supply(), 0);
}

#[test]
fn delegated_moderator_can_mint_and_burn() {
    let mut s = Scenario::new();
    let admin = s.admin;
    assert!(s.market.grant_role(admin, Role::Moderator, carol()).unwrap());

    s.market.mint_currency(carol(), bob(), 500).unwrap();
    s.market.burn_from(carol(), bob(), 200).unwrap();
    assert_eq!(s.market.balance_of(bob()), 300);
    assert_eq!(s.market.total_supply(), 300);

    assert!(s.market.revoke_role(admin, Role::Moderator, carol()).unwrap());
    let expected = TradepostError::Unauthorized {
        account: carol(),
        role: Role::Moderator,
    };
    s.assert_rejected(&expected, |m| m.burn_from(carol(), bob(), 1));
    s.market.verify_supply().unwrap();
}

#[test]
fn moderator_cannot_grant_roles() {
    let mut s = Scenario::new();
    let admin = s.admin;
    s.market.grant_role(admin, Role::Moderator, carol()).unwrap();
    let expected = TradepostError::Unauthorized {
        account: carol(),
        role: Role::Admin,
    };
    s.assert_rejected(&expected, |m| {
        m.grant_role(carol(), Role::Moderator, bob()).map(|_| ())
    });
}

// =========================================================================
// Test 5: Commands
// =========================================================================

#[test]
fn sale_driven_by_commands() {
    let mut s = Scenario::new();
    let admin = s.admin;
    let engine = s.engine;
    let script = vec![
        (alice(), Command::MintItem),
        (alice(), Command::ListItem {
            item: ItemId(0),
            price: 60,
        }),
        (admin, Command::MintCurrency {
            to: bob(),
            amount: 60,
        }),
        (bob(), Command::Approve {
            spender: engine,
            amount: 60,
        }),
        (bob(), Command::BuyItem { item: ItemId(0) }),
    ];
    for (caller, command) in script {
        s.market.execute(caller, command).unwrap();
    }
    assert_eq!(s.market.owner_of(ItemId(0)).unwrap(), bob());
    assert_eq!(s.market.balance_of(alice()), 60);

    let snapshot = s.market.snapshot();
    assert_eq!(snapshot.owner_of(ItemId(0)), Some(bob()));
    assert_eq!(snapshot.event_count, s.market.events().len());
}
