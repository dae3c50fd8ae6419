use crate::model::DocumentPath;
use crate::proto::Target;

/// What a watch listens to
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget {
    /// A single document, by full resource name
    Document(DocumentPath),
    /// A structured query, pre-encoded as protobuf, over documents under
    /// `parent`
    Query {
        parent: String,
        structured_query: Vec<u8>,
    },
}

impl ListenTarget {
    /// Builds the add-target descriptor, resuming from `resume_token` when
    /// one is known.
    pub fn to_proto(
        &self,
        target_id: i32,
        resume_token: Option<&[u8]>,
    ) -> Target {
        let target = match self {
            ListenTarget::Document(path) => Target::documents(target_id, vec![path.to_string()]),
            ListenTarget::Query {
                parent,
                structured_query,
            } => Target::query(target_id, parent.clone(), structured_query.clone()),
        };
        target.with_resume_token(resume_token)
    }
}
