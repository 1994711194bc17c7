mod presign;
mod resolver;
mod uploader;

pub use presign::{SignedUploadUrlIssuer, UploadGrant};
pub use resolver::PublicBlobUrlResolver;
pub use uploader::HttpObjectUploader;
