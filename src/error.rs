/// Errors reported by LTC2943 operations.
///
/// `E` is the error type of the underlying [`BusPort`](crate::BusPort).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus was not initialized and initializing it failed.
    NotReady(E),
    /// A bus read or write failed. The chip state is unknown.
    Transfer(E),
    /// [`AdcMode::Invalid`](crate::AdcMode::Invalid) can not be written to the chip.
    InvalidMode,
    /// The register payload does not fit into a single write frame.
    PayloadTooLong,
}
