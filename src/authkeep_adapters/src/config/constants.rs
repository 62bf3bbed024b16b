pub mod env {
    pub const CONFIG_PATH_ENV_VAR: &str = "AUTHKEEP_CONFIG";
    pub const ENV_PREFIX: &str = "AUTHKEEP";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "POSTMARK_AUTH_TOKEN";
    pub const EMAIL_SENDER_ENV_VAR: &str = "EMAIL_SENDER";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "AUTHKEEP_ALLOWED_ORIGINS";
    pub const COOKIE_DOMAIN_ENV_VAR: &str = "COOKIE_DOMAIN";
}

pub const DEFAULT_CONFIG_PATH: &str = "config/default";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const REQUEST_TIMEOUT_IN_SECS: i64 = 100;
    pub const REDIS_HOST_NAME: &str = "127.0.0.1";
    pub const POSTGRES_MAX_CONNECTIONS: i64 = 5;
    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_IN_MILLIS: i64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-with-enough-entropy-for-hs256";
}
