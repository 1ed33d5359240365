// 前端资源的交付方式：嵌入二进制
pub mod embed_frontend;
