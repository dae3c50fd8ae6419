use super::listen_request;
use super::target;
use super::target::query_target;
use super::ListenRequest;
use super::Target;
use super::TargetChange;

impl ListenRequest {
    /// Builds the request that opens a listen target on a fresh stream
    pub fn add_target(
        database: impl Into<String>,
        target: Target,
    ) -> Self {
        Self {
            database: database.into(),
            labels: Default::default(),
            target_change: Some(listen_request::TargetChange::AddTarget(target)),
        }
    }

    /// The target this request adds, if any
    pub fn added_target(&self) -> Option<&Target> {
        match &self.target_change {
            Some(listen_request::TargetChange::AddTarget(target)) => Some(target),
            _ => None,
        }
    }
}

impl Target {
    /// Target listening on an explicit list of document names
    pub fn documents(
        target_id: i32,
        names: Vec<String>,
    ) -> Self {
        Self {
            target_id,
            once: false,
            target_type: Some(target::TargetType::Documents(target::DocumentsTarget {
                documents: names,
            })),
            resume_type: None,
        }
    }

    /// Target listening on a pre-encoded structured query under `parent`
    pub fn query(
        target_id: i32,
        parent: impl Into<String>,
        structured_query: Vec<u8>,
    ) -> Self {
        Self {
            target_id,
            once: false,
            target_type: Some(target::TargetType::Query(target::QueryTarget {
                parent: parent.into(),
                query_type: Some(query_target::QueryType::StructuredQuery(structured_query)),
            })),
            resume_type: None,
        }
    }

    /// Attaches a resume token. `None` (or an empty token) leaves the target
    /// starting from scratch.
    pub fn with_resume_token(
        mut self,
        token: Option<&[u8]>,
    ) -> Self {
        self.resume_type = token
            .filter(|t| !t.is_empty())
            .map(|t| target::ResumeType::ResumeToken(t.to_vec()));
        self
    }

    pub fn resume_token(&self) -> Option<&[u8]> {
        match &self.resume_type {
            Some(target::ResumeType::ResumeToken(token)) => Some(token.as_slice()),
            _ => None,
        }
    }
}

impl TargetChange {
    /// True when the change applies to `target_id`. A change without target ids
    /// applies to every target on the stream.
    pub fn affects_target(
        &self,
        target_id: i32,
    ) -> bool {
        self.target_ids.is_empty() || self.target_ids.contains(&target_id)
    }
}
