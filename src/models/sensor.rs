// Hardware sensor models

/// One temperature reading from `sensors -j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Temperature {
    /// Logical sensor id, e.g. "cpu" or "nvme0n1".
    pub name: String,
    /// Hardware label, e.g. the drive model.
    pub device: String,
    /// Degrees Celsius.
    pub value: f64,
}
