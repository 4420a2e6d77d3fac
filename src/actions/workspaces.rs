use crate::identifier::Identifier;
use crate::registry::RawEntry;
use crate::workspace::WorkspaceService;

pub fn open(service: &WorkspaceService, raw: &str) -> anyhow::Result<()> {
    service.open(&Identifier::decode(RawEntry::new(raw)));
    Ok(())
}

pub fn remove(service: &WorkspaceService, raw: &str) -> anyhow::Result<()> {
    service.remove(&Identifier::decode(RawEntry::new(raw)))?;
    Ok(())
}

pub fn clear(service: &WorkspaceService) -> anyhow::Result<()> {
    service.clear_all()?;
    Ok(())
}

pub fn open_logs(service: &WorkspaceService) -> anyhow::Result<()> {
    service.open_logs();
    Ok(())
}
