pub mod external_ip;
pub mod http;
pub mod location;
pub mod output;
