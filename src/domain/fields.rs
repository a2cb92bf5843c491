//! Gateway parameter names.

/// Prefix shared by every signed gateway parameter.
pub const GATEWAY_PREFIX: &str = "vnp_";

pub const VERSION: &str = "vnp_Version";
pub const COMMAND: &str = "vnp_Command";
pub const TERMINAL_CODE: &str = "vnp_TmnCode";
pub const AMOUNT: &str = "vnp_Amount";
pub const CURRENCY: &str = "vnp_CurrCode";
pub const TXN_REF: &str = "vnp_TxnRef";
pub const ORDER_INFO: &str = "vnp_OrderInfo";
pub const ORDER_TYPE: &str = "vnp_OrderType";
pub const LOCALE: &str = "vnp_Locale";
pub const RETURN_URL: &str = "vnp_ReturnUrl";
pub const IP_ADDR: &str = "vnp_IpAddr";
pub const CREATE_DATE: &str = "vnp_CreateDate";
pub const EXPIRE_DATE: &str = "vnp_ExpireDate";
pub const BANK_CODE: &str = "vnp_BankCode";

pub const RESPONSE_CODE: &str = "vnp_ResponseCode";
pub const TRANSACTION_STATUS: &str = "vnp_TransactionStatus";
pub const TRANSACTION_NO: &str = "vnp_TransactionNo";
pub const PAY_DATE: &str = "vnp_PayDate";

pub const PAY_COMMAND: &str = "pay";
pub const CURRENCY_VND: &str = "VND";
