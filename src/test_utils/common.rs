use prost_types::Timestamp;
use tonic::Code;
use tracing_subscriber::EnvFilter;

use crate::constants::WATCH_TARGET_ID;
use crate::model::QueryDocument;
use crate::proto;
use crate::proto::listen_response::ResponseType;
use crate::proto::target_change::TargetChangeType;
use crate::proto::value::ValueType;
use crate::proto::ListenResponse;
use crate::BackoffPolicy;
use crate::WatchConfig;

pub const TEST_DATABASE: &str = "projects/test-project/databases/(default)";

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
}

/// Config with a deterministic backoff (`jitter = 0`)
pub fn test_config(
    base_delay_ms: u64,
    multiplier: f64,
) -> WatchConfig {
    let mut config = WatchConfig::default();
    config.listen.database = TEST_DATABASE.to_string();
    config.backoff = BackoffPolicy {
        base_delay_ms,
        max_delay_ms: 10_000,
        multiplier,
        jitter: 0.0,
    };
    config
}

/// Full resource name of `coll/{id}` in the test database
pub fn doc_name(id: &str) -> String {
    format!("{TEST_DATABASE}/documents/coll/{id}")
}

pub fn timestamp(seconds: i64) -> Timestamp {
    Timestamp { seconds, nanos: 0 }
}

pub fn integer_value(value: i64) -> proto::Value {
    proto::Value {
        value_type: Some(ValueType::IntegerValue(value)),
    }
}

pub fn document(
    name: &str,
    update_seconds: i64,
) -> proto::Document {
    document_with_fields(name, update_seconds, Vec::new())
}

pub fn document_with_fields(
    name: &str,
    update_seconds: i64,
    fields: Vec<(&str, proto::Value)>,
) -> proto::Document {
    proto::Document {
        name: name.to_string(),
        fields: fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        create_time: Some(timestamp(1)),
        update_time: Some(timestamp(update_seconds)),
    }
}

pub fn query_document(
    name: &str,
    update_seconds: i64,
) -> QueryDocument {
    QueryDocument::from_proto(document(name, update_seconds), None)
}

// ============== Listen responses ============== //

pub fn target_change(
    change_type: TargetChangeType,
    target_ids: Vec<i32>,
) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::TargetChange(proto::TargetChange {
            target_change_type: change_type as i32,
            target_ids,
            ..Default::default()
        })),
    }
}

pub fn add_target() -> ListenResponse {
    target_change(TargetChangeType::Add, vec![WATCH_TARGET_ID])
}

pub fn current() -> ListenResponse {
    target_change(TargetChangeType::Current, vec![WATCH_TARGET_ID])
}

pub fn reset() -> ListenResponse {
    target_change(TargetChangeType::Reset, vec![WATCH_TARGET_ID])
}

/// Global no-change carrying a read time: the result set is consistent
pub fn consistent_at(
    read_seconds: i64,
    resume_token: &[u8],
) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::TargetChange(proto::TargetChange {
            target_change_type: TargetChangeType::NoChange as i32,
            target_ids: Vec::new(),
            cause: None,
            resume_token: resume_token.to_vec(),
            read_time: Some(timestamp(read_seconds)),
        })),
    }
}

pub fn remove_target(cause: Option<(Code, &str)>) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::TargetChange(proto::TargetChange {
            target_change_type: TargetChangeType::Remove as i32,
            target_ids: vec![WATCH_TARGET_ID],
            cause: cause.map(|(code, message)| proto::rpc::Status {
                code: code as i32,
                message: message.to_string(),
                details: Vec::new(),
            }),
            ..Default::default()
        })),
    }
}

pub fn document_change(document: proto::Document) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::DocumentChange(proto::DocumentChange {
            document: Some(document),
            target_ids: vec![WATCH_TARGET_ID],
            removed_target_ids: Vec::new(),
        })),
    }
}

pub fn document_left_target(document: proto::Document) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::DocumentChange(proto::DocumentChange {
            document: Some(document),
            target_ids: Vec::new(),
            removed_target_ids: vec![WATCH_TARGET_ID],
        })),
    }
}

pub fn document_delete(name: &str) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::DocumentDelete(proto::DocumentDelete {
            document: name.to_string(),
            removed_target_ids: vec![WATCH_TARGET_ID],
            read_time: None,
        })),
    }
}

pub fn document_remove(name: &str) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::DocumentRemove(proto::DocumentRemove {
            document: name.to_string(),
            removed_target_ids: vec![WATCH_TARGET_ID],
            read_time: None,
        })),
    }
}

pub fn existence_filter(count: i32) -> ListenResponse {
    ListenResponse {
        response_type: Some(ResponseType::Filter(proto::ExistenceFilter {
            target_id: WATCH_TARGET_ID,
            count,
        })),
    }
}
