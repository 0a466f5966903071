//! 애플리케이션 조립(composition root) 모듈.

use anyhow::Result;

use crate::application::ports::{ConfigRepository, UserConfirmer};
use crate::application::usecases::detect_toolchain::DetectToolchainUseCase;
use crate::application::usecases::edit_settings::EditSettingsUseCase;
use crate::application::usecases::gate_feature::GateFeatureUseCase;
use crate::application::usecases::init_project::InitProjectUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::prepare_run::PrepareRunUseCase;
use crate::application::usecases::show_settings::ShowSettingsUseCase;
use crate::domain::reconcile::{FlagDerivation, GoBuildTargetDerivation};
use crate::infrastructure::adapters::{
    AutoConfirmer, ConsoleReporter, FsModuleScaffolder, JsonConfigRepository, JsonSettingsStore,
    StdinConfirmer, TinyGoProbe,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    settings_store: JsonSettingsStore,
    probe: TinyGoProbe,
    derivation: Box<dyn FlagDerivation>,
    scaffolder: FsModuleScaffolder,
    reporter: ConsoleReporter,
    confirmer: Box<dyn UserConfirmer>,
}

impl AppComposition {
    /// 앱 설정을 읽어 저장소 경로를 정하고 stdin 확인 어댑터로 조립한다.
    pub fn load() -> Result<Self> {
        Self::with_confirmer(Box::new(StdinConfirmer))
    }

    /// 확인 어댑터를 외부에서 주입한다.
    pub fn with_confirmer(confirmer: Box<dyn UserConfirmer>) -> Result<Self> {
        let config_repo = JsonConfigRepository;
        let config = config_repo.load()?;
        Ok(Self {
            settings_store: JsonSettingsStore::from_config(&config),
            config_repo,
            probe: TinyGoProbe,
            derivation: Box::new(GoBuildTargetDerivation),
            scaffolder: FsModuleScaffolder,
            reporter: ConsoleReporter::new(),
            confirmer,
        })
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    pub fn show_settings_usecase(&self) -> ShowSettingsUseCase<'_> {
        ShowSettingsUseCase {
            settings_store: &self.settings_store,
        }
    }

    /// 툴체인 감지 유스케이스를 생성한다.
    pub fn detect_usecase(&self) -> DetectToolchainUseCase<'_> {
        self.detect_with(self.confirmer.as_ref())
    }

    pub fn edit_settings_usecase(&self) -> EditSettingsUseCase<'_> {
        EditSettingsUseCase {
            settings_store: &self.settings_store,
            derivation: self.derivation.as_ref(),
            reporter: &self.reporter,
        }
    }

    pub fn gate_usecase(&self) -> GateFeatureUseCase<'_> {
        GateFeatureUseCase {
            settings_store: &self.settings_store,
        }
    }

    pub fn prepare_run_usecase(&self) -> PrepareRunUseCase<'_> {
        PrepareRunUseCase {
            settings_store: &self.settings_store,
        }
    }

    /// 프로젝트 구성은 감지 결과를 묻지 않고 저장한다.
    pub fn init_project_usecase(&self) -> InitProjectUseCase<'_> {
        InitProjectUseCase {
            detect: self.detect_with(&AutoConfirmer),
            scaffolder: &self.scaffolder,
            reporter: &self.reporter,
        }
    }

    fn detect_with<'a>(&'a self, confirmer: &'a dyn UserConfirmer) -> DetectToolchainUseCase<'a> {
        DetectToolchainUseCase {
            config_repo: &self.config_repo,
            settings_store: &self.settings_store,
            probe: &self.probe,
            derivation: self.derivation.as_ref(),
            confirmer,
            reporter: &self.reporter,
        }
    }
}
