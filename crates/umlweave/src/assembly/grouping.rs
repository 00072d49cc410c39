//! Grouping of persisted fragments by source document

use std::collections::BTreeMap;

use tracing::{debug, span, Level};

use super::assembler::assemble;
use crate::core::{Fragment, FragmentError, FragmentKey, Model};

/// Group keyed fragments under their document
///
/// Keys have the form `<document>_<class|rel><index>`. One unparsable key
/// fails the whole call so that no fragment lands in the wrong group.
/// Within a group, fragments keep their input order.
pub fn group_by_document<K, I>(entries: I) -> Result<BTreeMap<String, Vec<Fragment>>, FragmentError>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, Fragment)>,
{
    let group_span = span!(Level::DEBUG, "group_by_document");
    let _enter = group_span.enter();

    let mut groups: BTreeMap<String, Vec<Fragment>> = BTreeMap::new();
    for (key, fragment) in entries {
        let key: FragmentKey = key.as_ref().parse()?;
        groups.entry(key.document).or_default().push(fragment);
    }
    debug!(documents = groups.len(), "Grouped fragments");
    Ok(groups)
}

/// Assemble each document's fragments into its model
pub fn assemble_documents(groups: &BTreeMap<String, Vec<Fragment>>) -> BTreeMap<String, Model> {
    groups
        .iter()
        .map(|(document, fragments)| (document.clone(), assemble(fragments)))
        .collect()
}
