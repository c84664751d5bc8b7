/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - cors / http / security_headers は全体に、auth::access は更新系 route にだけ掛ける
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
