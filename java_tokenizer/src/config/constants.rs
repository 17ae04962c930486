pub mod compile_time {
    pub mod file_processing {
        /// Maximum source file size accepted for tokenization (10MB)
        /// SECURITY: The whole unit is held in memory while scanning
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a file "large" (1MB)
        /// PERFORMANCE: Large files get a warning event before scanning
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;

        /// Maximum line count accepted for a single compilation unit
        pub const MAX_LINE_COUNT: usize = 200_000;

        /// Extension of source files picked up by discovery
        pub const SOURCE_EXTENSION: &str = "java";
    }

    pub mod lexical {
        /// Maximum number of tokens produced from a single file
        /// SECURITY: Prevents runaway token collection in the driver
        pub const MAX_TOKEN_COUNT: usize = 2_000_000;

        /// Sentinel text carried by the end-of-input token
        pub const EOF_TEXT: &str = "";
    }

    pub mod batch_processing {
        /// Maximum number of worker threads for file processing
        /// RESOURCE: Controls system resource consumption
        pub const MAX_WORKER_THREADS: usize = 8;

        /// Upper bound accepted for `--threads`
        pub const MAX_THREAD_OVERRIDE: usize = 32;

        /// Maximum files per batch to prevent memory exhaustion
        pub const MAX_FILES_PER_BATCH: usize = 10_000;

        /// Files handed to a single worker at once
        pub const MIN_CHUNK_SIZE: usize = 1;
        pub const MAX_CHUNK_SIZE: usize = 50;
    }

    pub mod logging {
        /// Maximum errors to collect before stopping
        pub const MAX_ERROR_COLLECTION: usize = 1_000;

        /// Log buffer size for batch operations
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Token dumps can be long, longer messages are truncated
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum log events per file before truncation
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;

        /// Minimum log level that can never be filtered out (Warning)
        pub const SECURITY_MIN_LOG_LEVEL: u8 = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn limits_are_consistent() {
        assert!(file_processing::LARGE_FILE_THRESHOLD < file_processing::MAX_FILE_SIZE);
        assert!(batch_processing::MIN_CHUNK_SIZE <= batch_processing::MAX_CHUNK_SIZE);
        assert!(batch_processing::MAX_WORKER_THREADS <= batch_processing::MAX_THREAD_OVERRIDE);
        assert!(lexical::EOF_TEXT.is_empty());
    }
}
