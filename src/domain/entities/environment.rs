/// The App Store environment that generated a receipt, as reported by the
/// validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
    Unknown(String),
}
