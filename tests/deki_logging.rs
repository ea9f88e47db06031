/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, API};
    use log::{LevelFilter, Log, Metadata, Record};
    use mindtouch::deki::NewUser;
    use std::sync::Mutex;

    // Keeps the records of this crate so tests can look for leaked values
    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.target().starts_with("mindtouch")
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    #[tokio::test]
    async fn new_user_password_stays_out_of_the_log() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);

        let (mut server, client) = helpers::basic_client().await;
        let mock = server
            .mock("POST", format!("{API}/users?accountpassword=hunter2").as_str())
            .with_status(200)
            .with_body(r#"<user id="40"/>"#)
            .create_async()
            .await;

        let user = NewUser {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        client.users_post(&user).await.unwrap();
        mock.assert_async().await;

        let lines = LOGGER.lines.lock().unwrap();
        let request_line = lines
            .iter()
            .find(|l| l.starts_with("POST ") && l.contains("/@api/deki/users"))
            .expect("request was logged");
        assert!(request_line.contains("accountpassword=xxx"));
        assert!(lines.iter().all(|l| !l.contains("hunter2")));
    }
}
