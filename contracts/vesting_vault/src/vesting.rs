//! Grant model and the monthly linear vesting math with a lock period.
//!
//! Everything here is a pure function of grant state and an instant, so claim,
//! revoke and the read accessors all go through the same arithmetic.

use soroban_sdk::{contracttype, Address};

use crate::error::VaultError;

/// 30 days.
pub const DEFAULT_MONTH_LENGTH: u64 = 30 * 86_400;
/// 10 years of months.
pub const DEFAULT_MAX_CLIFF_MONTHS: u32 = 120;
/// 25 years of months.
pub const DEFAULT_MAX_DURATION_MONTHS: u32 = 300;

/// Calendar policy fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingPolicy {
    /// Length of one vesting month in ledger seconds.
    pub month_length: u64,
    pub max_cliff_months: u32,
    pub max_duration_months: u32,
}

impl VestingPolicy {
    pub fn standard() -> Self {
        VestingPolicy {
            month_length: DEFAULT_MONTH_LENGTH,
            max_cliff_months: DEFAULT_MAX_CLIFF_MONTHS,
            max_duration_months: DEFAULT_MAX_DURATION_MONTHS,
        }
    }

    pub fn validate(&self) -> Result<(), VaultError> {
        if self.month_length == 0 || self.max_duration_months == 0 {
            return Err(VaultError::InvalidPolicy);
        }
        Ok(())
    }

    /// Parameter checks for a new grant, in rejection order.
    pub fn check_grant(
        &self,
        amount: i128,
        vesting_duration: u32,
        vesting_cliff: u32,
    ) -> Result<(), VaultError> {
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if vesting_cliff > self.max_cliff_months {
            return Err(VaultError::LockTooLong);
        }
        if vesting_duration > self.max_duration_months {
            return Err(VaultError::DurationTooLong);
        }
        if vesting_duration == 0 {
            return Err(VaultError::InvalidDuration);
        }
        if amount / vesting_duration as i128 == 0 {
            return Err(VaultError::ZeroMonthlyVesting);
        }
        Ok(())
    }
}

/// A recipient's entitlement, one per recipient address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenGrant {
    pub recipient: Address,
    pub start_time: u64,
    pub amount: i128,
    /// Months.
    pub vesting_duration: u32,
    /// Months during which nothing vests.
    pub vesting_cliff: u32,
    /// Observational only; payouts are driven by elapsed time and `total_claimed`.
    pub months_claimed: u32,
    pub total_claimed: i128,
}

/// Snapshot returned by `grant_status`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantStatus {
    pub amount: i128,
    pub total_claimed: i128,
    pub vested: i128,
    pub claimable: i128,
    pub unvested: i128,
    pub elapsed_months: u64,
}

// ---------------------------------------------------------------------------
// Core maths
// ---------------------------------------------------------------------------

/// Whole months between `start` and `now`; zero if `now` precedes `start`.
pub fn elapsed_months(start: u64, now: u64, month_length: u64) -> u64 {
    if month_length == 0 {
        return 0;
    }
    now.saturating_sub(start) / month_length
}

/// Amount vested after `elapsed` whole months.
///
/// Partial months round down and the truncation remainder is only released
/// once `elapsed` reaches the full duration, so per-claim deltas always sum to
/// exactly `amount`.
pub fn vested_for_months(
    amount: i128,
    vesting_duration: u32,
    vesting_cliff: u32,
    elapsed: u64,
) -> Result<i128, VaultError> {
    if elapsed < vesting_cliff as u64 {
        return Ok(0);
    }
    if elapsed >= vesting_duration as u64 {
        return Ok(amount);
    }

    // Split on the duration so no intermediate exceeds `amount`:
    // floor(a * e / d) == (a / d) * e + (a % d) * e / d.
    let duration = vesting_duration as i128;
    let elapsed = elapsed as i128;
    let whole = (amount / duration)
        .checked_mul(elapsed)
        .ok_or(VaultError::MathOverflow)?;
    let partial = (amount % duration)
        .checked_mul(elapsed)
        .ok_or(VaultError::MathOverflow)?
        / duration;
    whole.checked_add(partial).ok_or(VaultError::MathOverflow)
}

impl TokenGrant {
    pub fn new(
        recipient: Address,
        start_time: u64,
        amount: i128,
        vesting_duration: u32,
        vesting_cliff: u32,
    ) -> Self {
        TokenGrant {
            recipient,
            start_time,
            amount,
            vesting_duration,
            vesting_cliff,
            months_claimed: 0,
            total_claimed: 0,
        }
    }

    pub fn elapsed_months(&self, policy: &VestingPolicy, now: u64) -> u64 {
        elapsed_months(self.start_time, now, policy.month_length)
    }

    pub fn vested_amount(&self, policy: &VestingPolicy, now: u64) -> Result<i128, VaultError> {
        vested_for_months(
            self.amount,
            self.vesting_duration,
            self.vesting_cliff,
            self.elapsed_months(policy, now),
        )
    }

    pub fn claimable_amount(&self, policy: &VestingPolicy, now: u64) -> Result<i128, VaultError> {
        let vested = self.vested_amount(policy, now)?;
        Ok((vested - self.total_claimed).max(0))
    }

    /// What the administrator would get back if the grant were revoked at `now`.
    pub fn unvested_amount(&self, policy: &VestingPolicy, now: u64) -> Result<i128, VaultError> {
        let vested = self.vested_amount(policy, now)?;
        Ok(self.amount - vested)
    }

    pub fn is_fully_claimed(&self) -> bool {
        self.total_claimed >= self.amount
    }

    /// Books a payout of `claimed` at `now`.
    pub fn record_claim(&mut self, policy: &VestingPolicy, now: u64, claimed: i128) {
        self.total_claimed += claimed;
        let covered = self
            .elapsed_months(policy, now)
            .min(self.vesting_duration as u64);
        self.months_claimed = self.months_claimed.max(covered as u32);
    }

    pub fn status(&self, policy: &VestingPolicy, now: u64) -> Result<GrantStatus, VaultError> {
        let vested = self.vested_amount(policy, now)?;
        Ok(GrantStatus {
            amount: self.amount,
            total_claimed: self.total_claimed,
            vested,
            claimable: (vested - self.total_claimed).max(0),
            unvested: self.amount - vested,
            elapsed_months: self.elapsed_months(policy, now),
        })
    }
}
