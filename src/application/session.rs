//! 설정 편집 세션(Loaded → Editing → Committed | Discarded).
//!
//! 상태 전이는 값을 소비하므로 Committed/Discarded에서 Editing으로 돌아갈 수 없다.
//! 다시 편집하려면 `SettingsSession::load`부터 시작한다.

use anyhow::{Context, Result};

use crate::application::ports::SettingsStore;
use crate::domain::settings::ConfigurationSnapshot;

impl ConfigurationSnapshot {
    /// 두 scope를 저장소에 커밋한다. 영속화 부작용이 있는 유일한 연산.
    pub fn save_state(&self, store: &dyn SettingsStore) -> Result<()> {
        store.store(self).context("failed to save settings")?;
        tracing::info!(enabled = self.enabled(), "settings saved");
        Ok(())
    }
}

/// 저장소에서 baseline을 읽어 온 상태.
pub struct SettingsSession<'a> {
    store: &'a dyn SettingsStore,
    baseline: ConfigurationSnapshot,
}

/// 작업 사본을 자유롭게 수정하는 상태.
pub struct EditingSession<'a> {
    store: &'a dyn SettingsStore,
    baseline: ConfigurationSnapshot,
    working: ConfigurationSnapshot,
}

/// 세션 종료 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// 커밋된 스냅샷이 새 baseline이 된다.
    Committed(ConfigurationSnapshot),
    /// 작업 사본을 버렸다. baseline은 그대로다.
    Discarded(ConfigurationSnapshot),
}

impl SessionEnd {
    pub fn snapshot(&self) -> &ConfigurationSnapshot {
        match self {
            SessionEnd::Committed(s) | SessionEnd::Discarded(s) => s,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, SessionEnd::Committed(_))
    }
}

impl<'a> SettingsSession<'a> {
    pub fn load(store: &'a dyn SettingsStore) -> Result<Self> {
        let baseline = store.load().context("failed to load settings")?;
        Ok(Self { store, baseline })
    }

    pub fn baseline(&self) -> &ConfigurationSnapshot {
        &self.baseline
    }

    pub fn begin_edit(self) -> EditingSession<'a> {
        let working = self.baseline.deep_copy();
        EditingSession {
            store: self.store,
            baseline: self.baseline,
            working,
        }
    }
}

impl<'a> EditingSession<'a> {
    pub fn baseline(&self) -> &ConfigurationSnapshot {
        &self.baseline
    }

    pub fn working(&self) -> &ConfigurationSnapshot {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut ConfigurationSnapshot {
        &mut self.working
    }

    /// 작업 사본 전체를 교체한다(감지 결과 병합 등).
    pub fn replace_working(&mut self, snapshot: ConfigurationSnapshot) {
        self.working = snapshot;
    }

    pub fn is_modified(&self) -> bool {
        self.working.modified(&self.baseline)
    }

    pub fn commit(self) -> Result<SessionEnd> {
        self.working.save_state(self.store)?;
        Ok(SessionEnd::Committed(self.working))
    }

    pub fn discard(self) -> SessionEnd {
        tracing::debug!(modified = self.is_modified(), "settings edit discarded");
        SessionEnd::Discarded(self.baseline)
    }

    /// 변경이 있을 때만 커밋한다.
    pub fn commit_if_modified(self) -> Result<SessionEnd> {
        if self.is_modified() {
            self.commit()
        } else {
            Ok(self.discard())
        }
    }
}
