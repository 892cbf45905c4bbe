use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Collection;
use crate::store::backend::StorageBackend;
use crate::store::{CollectionRepository, DocumentStore};

pub fn run<B: StorageBackend>(store: &DocumentStore<B>, collection: Collection) -> Result<CmdResult> {
    let records = CollectionRepository::new(store, collection).list()?;

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!("No {} yet.", collection)));
    }
    Ok(result.with_listed_records(records))
}
