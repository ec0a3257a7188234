//! Integration tests for the verification flow behind trait objects

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use mv_core::errors::{DomainError, VerificationError};
    use mv_core::services::token::EmailTokenConfig;
    use mv_core::services::verification::{
        CacheStoreTrait, EmailSenderTrait, RequestSmsCode, SmsCodeCheck, SmsDelivery,
        SmsGatewayTrait, VerificationCoordinator, VerificationServiceConfig,
    };
    use mv_core::domain::VerificationStage;

    // Store without expiry; the flow under test never waits for a TTL
    #[derive(Default)]
    struct SharedStore {
        entries: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl CacheStoreTrait for SharedStore {
        async fn set_with_expiry(&self, key: &str, value: &str, _ttl_secs: u64) -> Result<(), String> {
            self.entries.write().await.insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn delete(&self, key: &str) -> Result<bool, String> {
            Ok(self.entries.write().await.remove(key).is_some())
        }

        async fn get_and_delete(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.entries.write().await.remove(key))
        }

        async fn set_if_absent(&self, key: &str, value: &str, _ttl_secs: u64) -> Result<bool, String> {
            let mut entries = self.entries.write().await;
            if entries.contains_key(key) {
                return Ok(false);
            }
            entries.insert(key.to_string(), value.to_string());
            Ok(true)
        }

        async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<bool, String> {
            let mut entries = self.entries.write().await;
            if entries.get(key).map(String::as_str) == Some(expected) {
                entries.remove(key);
                return Ok(true);
            }
            Ok(false)
        }

        async fn ttl(&self, key: &str) -> Result<Option<u64>, String> {
            Ok(self.entries.read().await.get(key).map(|_| 300))
        }
    }

    #[derive(Default)]
    struct RecordingGateway {
        codes: RwLock<HashMap<String, String>>,
    }

    #[async_trait]
    impl SmsGatewayTrait for RecordingGateway {
        async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
            self.codes.write().await.insert(phone.to_string(), code.to_string());
            Ok(format!("msg_id_{}", phone))
        }
    }

    struct NullSender;

    #[async_trait]
    impl EmailSenderTrait for NullSender {
        async fn send_html(&self, _to: &str, _subject: &str, _html_body: &str) -> Result<(), String> {
            Ok(())
        }
    }

    type DynCoordinator =
        VerificationCoordinator<dyn CacheStoreTrait, dyn SmsGatewayTrait, dyn EmailSenderTrait>;

    fn coordinator(store: Arc<SharedStore>, gateway: Arc<RecordingGateway>) -> DynCoordinator {
        let store: Arc<dyn CacheStoreTrait> = store;
        let gateway: Arc<dyn SmsGatewayTrait> = gateway;
        let sender: Arc<dyn EmailSenderTrait> = Arc::new(NullSender);
        VerificationCoordinator::new(
            store,
            gateway,
            sender,
            VerificationServiceConfig::default(),
            EmailTokenConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_complete_flow_through_trait_objects() {
        let store = Arc::new(SharedStore::default());
        let gateway = Arc::new(RecordingGateway::default());
        let coordinator = coordinator(store.clone(), gateway.clone());

        coordinator.request_image_code("e3b0c442").await.unwrap();
        assert_eq!(
            coordinator.current_stage(Some("e3b0c442"), Some("13912345678")).await.unwrap(),
            VerificationStage::ImageIssued
        );

        let answer = store.get("img_e3b0c442").await.unwrap().unwrap();
        let sent = coordinator
            .request_sms_code(RequestSmsCode {
                mobile: "13912345678".to_string(),
                challenge_id: Some("e3b0c442".to_string()),
                image_code: Some(answer),
            })
            .await
            .unwrap();
        assert_eq!(
            sent.delivery,
            SmsDelivery::Sent {
                message_id: "msg_id_13912345678".to_string()
            }
        );
        assert_eq!(
            coordinator.current_stage(Some("e3b0c442"), Some("13912345678")).await.unwrap(),
            VerificationStage::SmsIssued
        );

        let code = gateway.codes.read().await.get("13912345678").cloned().unwrap();
        assert_eq!(
            coordinator.validate_sms_code("13912345678", &code).await.unwrap(),
            SmsCodeCheck::Valid
        );
        assert_eq!(
            coordinator.current_stage(Some("e3b0c442"), Some("13912345678")).await.unwrap(),
            VerificationStage::NoChallenge
        );
    }

    #[tokio::test]
    async fn test_captcha_is_single_use_across_requests() {
        let store = Arc::new(SharedStore::default());
        let gateway = Arc::new(RecordingGateway::default());
        let coordinator = coordinator(store.clone(), gateway);

        coordinator.request_image_code("c0ffee").await.unwrap();
        let answer = store.get("img_c0ffee").await.unwrap().unwrap();

        let request = |mobile: &str| RequestSmsCode {
            mobile: mobile.to_string(),
            challenge_id: Some("c0ffee".to_string()),
            image_code: Some(answer.clone()),
        };

        assert!(coordinator.request_sms_code(request("13912345678")).await.is_ok());

        // Same captcha for a different mobile
        let reuse = coordinator.request_sms_code(request("13712345678")).await;
        assert_eq!(
            reuse.unwrap_err(),
            DomainError::Verification(VerificationError::ExpiredOrMissing)
        );
    }
}
