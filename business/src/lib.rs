pub mod application {
    pub mod receipt {
        pub mod extract;
        pub mod progress_tracker;
    }
}

pub mod domain {
    pub mod logger;
    pub mod receipt {
        pub mod errors;
        pub mod image_source;
        pub mod model;
        pub mod normalizer;
        pub mod parser;
        pub mod progress;
        pub mod prompt;
        pub mod services;
        pub mod value_objects;
        pub mod use_cases {
            pub mod extract;
        }
    }
}
