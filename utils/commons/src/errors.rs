use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Sender lacks the role required for the operation (Error code: -4).
    Unauthorized,
    /// No auction is running for the token (Error code: -5).
    NoSuchAuction,
    /// The token is already under auction (Error code: -6).
    AlreadyUnderAuction,
    /// Auction duration must be strictly positive (Error code: -7).
    InvalidDuration,
    /// Attached amount is below the current auction price (Error code: -8).
    InsufficientOffer,
    /// Mutating call attempted while the contract is paused (Error code: -9).
    PausedState,
    /// Operation is only allowed while the contract is paused (Error code: -10).
    NotPaused,
    /// Only account addresses can bid or hold proceeds (Error code: -11).
    OnlyAccountAddress,
    /// Fee rate must be within 0..=10000 basis points (Error code: -12).
    InvalidFeeRate,
    /// Unsupported (Error code: -13)
    Unsupported,
    /// Failed to invoke a contract (Error code: -14).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -15).
    InvokeTransferError,
    /// Incompatible contract (Error code: -16)
    Incompatible,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Errors of a contract query that expects a typed response.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(cre: ContractReadError<R>) -> Self {
        match cre {
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}
