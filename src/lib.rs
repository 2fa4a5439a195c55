pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod common;
            pub(crate) mod in_app_model;
            pub(crate) mod pending_renewal_info_model;
            pub(crate) mod receipt_model;
            pub(crate) mod request_body_model;
            pub(crate) mod response_body_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod environment;
        pub mod in_app_receipt;
        pub mod pending_renewal_info;
        pub mod receipt;
        pub mod verification_error;
        pub mod verification_outcome;
        pub mod verify_options;
    }
    pub mod repositories {
        pub mod receipt_repository;
    }
}

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
