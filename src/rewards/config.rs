// Fixed business constants for the rewards program
//
// The point-per-type table lives on `ActivityType` itself; what remains
// here are the redemption rules, which apply uniformly to every user.

/// Minimum balance required before a redemption is allowed
pub const REDEMPTION_THRESHOLD: i32 = 100;

/// Points debited by one successful redemption.
/// A call never redeems more than one voucher, no matter how far above the
/// threshold the balance sits; callers redeem once per voucher.
pub const REDEMPTION_DEBIT: i32 = 100;

/// Voucher issued by a successful redemption
pub const REDEMPTION_VOUCHER: &str = "10% off next order";
