/// 서버 엔드포인트별 타입 API
/// 모든 호출은 RequestPipeline 을 거친다.
pub mod auth;
pub mod bids;
pub mod products;
pub mod upload;
pub mod user;

pub use auth::{AuthApi, AuthResponse, LoginRequest, RegisterRequest};
pub use bids::BidsApi;
pub use products::{NewProduct, ProductQuery, ProductUpdate, ProductsApi};
pub use upload::UploadApi;
pub use user::{ProfileUpdate, UserApi, UserBidItem, UserBidStatus, UserProfile};
