pub const MEMBER: &str = "Member";
pub const BALANCE: &str = "Balance";
pub const MARK: &str = "";
pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const AMOUNT: &str = "Amount";
pub const NO_PAYMENTS: &str = "No payments needed.";
pub const NO_DEBTS: &str = "(no debts)";
pub const ALREADY_MINIMAL: &str = "Raw debts (already minimal)";
pub const HIGHLIGHTED: &str = "*";
pub const INSERTED: &str = "+";
