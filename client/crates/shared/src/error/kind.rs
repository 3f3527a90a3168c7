//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum used to classify failures observed by the
//! console client, either from an HTTP status or from the transport itself.

use serde::Serialize;

/// エラー種別の列挙体
///
/// クライアントが観測した失敗を分類します。
/// HTTP レスポンス由来の種別はステータスコードに対応し、
/// 通信そのものが失敗した場合は [`ErrorKind::Network`] になります。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(401);
/// assert_eq!(kind, ErrorKind::Unauthorized);
/// assert_eq!(kind.status_code(), Some(401));
/// assert!(kind.is_auth_failure());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request: 入力が不正
    BadRequest,
    /// 401 - Unauthorized: 認証が無効
    Unauthorized,
    /// 403 - Forbidden: 権限なし
    Forbidden,
    /// 404 - Not Found: リソースが見つからない
    NotFound,
    /// 408 - Request Timeout: リクエストタイムアウト
    RequestTimeout,
    /// 409 - Conflict: 現在の状態と競合
    Conflict,
    /// 429 - Too Many Requests: レート制限超過
    TooManyRequests,
    /// 500 - Internal Server Error: サーバー内部エラー
    InternalServerError,
    /// 502 - Bad Gateway: 上流サーバーの応答不正
    BadGateway,
    /// 503 - Service Unavailable: サービス利用不可
    ServiceUnavailable,
    /// 504 - Gateway Timeout: 上流サーバーのタイムアウト
    GatewayTimeout,
    /// 通信失敗（接続不可、タイムアウトなど）。ステータスコードなし
    Network,
    /// ローカルの永続化ストレージの失敗
    Storage,
}

impl ErrorKind {
    /// HTTP ステータスコードから種別を判定
    ///
    /// 既知でない 4xx は `BadRequest`、既知でない 5xx は
    /// `InternalServerError` に丸められます。
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::from_status(503), ErrorKind::ServiceUnavailable);
    /// assert_eq!(ErrorKind::from_status(418), ErrorKind::BadRequest);
    /// ```
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            408 => ErrorKind::RequestTimeout,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::TooManyRequests,
            502 => ErrorKind::BadGateway,
            503 => ErrorKind::ServiceUnavailable,
            504 => ErrorKind::GatewayTimeout,
            400..=499 => ErrorKind::BadRequest,
            _ => ErrorKind::InternalServerError,
        }
    }

    /// HTTP ステータスコードを取得
    ///
    /// ## Returns
    /// 対応するステータスコード。通信・ストレージ由来の種別では `None`
    #[inline]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            ErrorKind::BadRequest => Some(400),
            ErrorKind::Unauthorized => Some(401),
            ErrorKind::Forbidden => Some(403),
            ErrorKind::NotFound => Some(404),
            ErrorKind::RequestTimeout => Some(408),
            ErrorKind::Conflict => Some(409),
            ErrorKind::TooManyRequests => Some(429),
            ErrorKind::InternalServerError => Some(500),
            ErrorKind::BadGateway => Some(502),
            ErrorKind::ServiceUnavailable => Some(503),
            ErrorKind::GatewayTimeout => Some(504),
            ErrorKind::Network | ErrorKind::Storage => None,
        }
    }

    /// ユーザー向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
            ErrorKind::GatewayTimeout => "Gateway Timeout",
            ErrorKind::Network => "Network Failure",
            ErrorKind::Storage => "Storage Failure",
        }
    }

    /// 一時的な失敗かどうかを判定
    ///
    /// `true` の場合、冪等なリクエストは再試行してよい。
    /// 認証失敗は一時的な失敗として扱いません。
    #[inline]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorKind::Network
                | ErrorKind::RequestTimeout
                | ErrorKind::TooManyRequests
                | ErrorKind::BadGateway
                | ErrorKind::ServiceUnavailable
                | ErrorKind::GatewayTimeout
        )
    }

    /// 認証失敗（セッション破棄の対象）かどうか
    #[inline]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, ErrorKind::Unauthorized)
    }

    /// サーバー側のエラーかどうかを判定
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        match self.status_code() {
            Some(code) => code >= 500,
            None => false,
        }
    }

    /// クライアント側のエラーかどうかを判定
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        match self.status_code() {
            Some(code) => code >= 400 && code < 500,
            None => false,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
