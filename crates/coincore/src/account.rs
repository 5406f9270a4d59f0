//! Per-user account state

/// Coins every new account starts with.
pub const STARTING_COINS: u64 = 100;

/// Mock crypto balances. Nothing in the bot moves real funds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Wallet {
    pub usdt: f64,
    pub btc: f64,
    pub eth: f64,
}

impl Wallet {
    /// Renders the balances with fixed precision: 2 places for USDT,
    /// 8 for BTC, 6 for ETH.
    pub fn format_balances(&self) -> String {
        format!("USDT: {:.2}\nBTC: {:.8}\nETH: {:.6}", self.usdt, self.btc, self.eth)
    }
}

/// Ledger entry for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub coins: u64,
    pub premium: bool,
    pub wallet: Wallet,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            premium: false,
            wallet: Wallet::default(),
        }
    }
}

impl Account {
    /// Applies a signed change to the coin balance and returns the new balance.
    ///
    /// Negative deltas stop at zero; positive ones saturate at `u64::MAX`.
    pub fn apply_delta(&mut self, delta: i64) -> u64 {
        self.coins = if delta >= 0 {
            self.coins.saturating_add(delta.unsigned_abs())
        } else {
            self.coins.saturating_sub(delta.unsigned_abs())
        };
        self.coins
    }

    pub fn premium_label(&self) -> &'static str {
        if self.premium {
            "ON"
        } else {
            "OFF"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_account() {
        let account = Account::default();
        assert_eq!(account.coins, 100);
        assert!(!account.premium);
        assert_eq!(account.wallet, Wallet { usdt: 0.0, btc: 0.0, eth: 0.0 });
    }

    #[test]
    fn test_apply_delta_clamps_at_zero() {
        let mut account = Account::default();
        assert_eq!(account.apply_delta(-1000), 0);
        assert_eq!(account.apply_delta(-1), 0);
        assert_eq!(account.apply_delta(i64::MIN), 0);
    }

    #[test]
    fn test_apply_delta_saturates_high() {
        let mut account = Account {
            coins: u64::MAX - 1,
            ..Account::default()
        };
        assert_eq!(account.apply_delta(i64::MAX), u64::MAX);
    }

    #[test]
    fn test_wallet_precision() {
        let wallet = Wallet {
            usdt: 12.5,
            btc: 0.000123,
            eth: 1.0 / 3.0,
        };
        assert_eq!(wallet.format_balances(), "USDT: 12.50\nBTC: 0.00012300\nETH: 0.333333");
    }
}
