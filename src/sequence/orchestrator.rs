//! Sequence orchestrator
//!
//! Drives the callback phases of a toolchange:
//!
//! `PRE_UNLOAD -> FORM_TIP -> POST_FORM_TIP -> UNLOAD_SEQUENCE -> POST_UNLOAD
//!  -> PRE_LOAD -> LOAD_SEQUENCE -> POST_LOAD`
//!
//! Every callback phase runs inside a [`MotionStateGuard`], so the ambient
//! G-code state is back to what it was when the phase started, whether the
//! phase succeeds or fails. Callback phases not enabled in the configuration
//! are skipped. The unload and load sequences are planned step by step when
//! advanced sequencing is enabled and delegated to the actuator's built-in
//! routine otherwise.
//!
//! Errors abort the phase and are returned to the caller with the phase
//! attached. The park state is not cleared on error.

use crate::core::filament::{
    plan_load, plan_unload, FilamentPosition, LoadRequest, SequenceArgs, UnloadRequest,
};
use crate::core::motion::Xy;
use crate::core::parameters::{Callbacks, SequenceConfig};
use crate::park::{ParkController, SessionContext};
use crate::platform::{FilamentActuator, PrinterHost, Result as HostResult};

use super::error::ToolchangeError;
use super::guard::MotionStateGuard;
use super::phase::SequencePhase;
use super::runner::run_plan;

/// Result type for orchestrator operations
pub type Result<T> = core::result::Result<T, ToolchangeError>;

/// Toolchange sequence orchestrator
///
/// Owns the session's filament position and park controller together with
/// the host and actuator it drives.
pub struct SequenceOrchestrator<H: PrinterHost, A: FilamentActuator> {
    host: H,
    actuator: A,
    park: ParkController,
    config: SequenceConfig,
    position: FilamentPosition,
}

impl<H: PrinterHost, A: FilamentActuator> SequenceOrchestrator<H, A> {
    /// Create an orchestrator with unknown filament position
    pub fn new(host: H, actuator: A, config: SequenceConfig) -> Self {
        Self {
            host,
            actuator,
            park: ParkController::new(),
            config,
            position: FilamentPosition::Unknown,
        }
    }

    /// Resume with an existing park controller
    pub fn with_park(mut self, park: ParkController) -> Self {
        self.park = park;
        self
    }

    /// Current filament position
    pub fn position(&self) -> FilamentPosition {
        self.position
    }

    /// Override the filament position (e.g. from sensors after a restart)
    pub fn set_position(&mut self, position: FilamentPosition) {
        self.position = position;
    }

    /// Park controller
    pub fn park(&self) -> &ParkController {
        &self.park
    }

    /// Configuration snapshot
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Printer host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Printer host (mutable)
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Filament actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Filament actuator (mutable)
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Give back the host and actuator
    pub fn into_parts(self) -> (H, A) {
        (self.host, self.actuator)
    }

    /// Record the slicer's next planar position
    pub fn set_next_position(&mut self, next: Xy) {
        crate::log_debug!("Next position X {} Y {}", next.x, next.y);
        self.park.set_next_position(next);
    }

    /// Drop saved and next positions without moving
    pub fn clear_position(&mut self) {
        self.park.clear_position();
    }

    /// Layer change: raise the parking floor to at least `height`
    pub fn on_layer_change(&mut self, height: f32) {
        self.park.record_max_height(&self.host, height);
    }

    /// Restore the toolhead outside POST_LOAD (resume after a pause)
    pub fn restore_position(&mut self, context: &SessionContext) -> Result<()> {
        let phase = SequencePhase::PostLoad;
        let mut host = MotionStateGuard::acquire(&mut self.host);
        self.park
            .restore_position(&mut *host, &self.config.park, context)
            .map_err(ToolchangeError::in_phase(phase))?;
        host.release().map_err(ToolchangeError::in_phase(phase))
    }

    /// PRE_UNLOAD: auto-home, save position, park (unless deferred), hook
    pub fn pre_unload(&mut self, context: &SessionContext) -> Result<()> {
        let phase = SequencePhase::PreUnload;
        if !self.begin(phase, Callbacks::PRE_UNLOAD) {
            return Ok(());
        }

        let params = &self.config.park;
        let mut host = MotionStateGuard::acquire(&mut self.host);
        self.park
            .auto_home(&mut *host, params)
            .map_err(ToolchangeError::in_phase(phase))?;
        self.park.save_position(&mut *host);
        if params.park_after_form_tip {
            crate::log_debug!("Park deferred until after tip forming");
        } else {
            self.park
                .park(&mut *host, params, &self.config.hooks, context, None)
                .map_err(ToolchangeError::in_phase(phase))?;
        }
        run_hook(&mut *host, self.config.hooks.pre_unload.as_deref())
            .map_err(ToolchangeError::in_phase(phase))?;
        host.release().map_err(ToolchangeError::in_phase(phase))?;

        crate::log_debug!("{} done", phase);
        Ok(())
    }

    /// Tip forming, only when filament is in the extruder
    ///
    /// Returns the filament position in the extruder after tip forming
    /// (mm), `None` when skipped.
    pub fn form_tip(&mut self) -> Result<Option<f32>> {
        let phase = SequencePhase::FormTip;
        if self.position < FilamentPosition::PastExtruder {
            crate::log_debug!("{} skipped, filament at {}", phase, self.position);
            return Ok(None);
        }

        crate::log_info!("{}", phase);
        let park_pos = self
            .actuator
            .form_tip()
            .map_err(ToolchangeError::in_phase(phase))?;
        Ok(Some(park_pos))
    }

    /// POST_FORM_TIP: park if it was deferred from PRE_UNLOAD
    pub fn post_form_tip(&mut self, context: &SessionContext) -> Result<()> {
        let phase = SequencePhase::PostFormTip;
        if !self.begin(phase, Callbacks::POST_FORM_TIP) {
            return Ok(());
        }

        let params = &self.config.park;
        let mut host = MotionStateGuard::acquire(&mut self.host);
        if params.park_after_form_tip {
            self.park
                .park(&mut *host, params, &self.config.hooks, context, None)
                .map_err(ToolchangeError::in_phase(phase))?;
        }
        host.release().map_err(ToolchangeError::in_phase(phase))?;

        crate::log_debug!("{} done", phase);
        Ok(())
    }

    /// Unload the filament
    ///
    /// Returns the filament position reported by the last step.
    pub fn unload_sequence(&mut self, request: &UnloadRequest) -> Result<FilamentPosition> {
        let phase = SequencePhase::UnloadSequence;

        if self.config.sequence.advanced_unload {
            let plan =
                plan_unload(self.position, request).map_err(ToolchangeError::in_phase(phase))?;
            crate::log_info!("{}: {} steps from {}", phase, plan.len(), self.position);
            run_plan(&mut self.actuator, &mut self.position, &plan)
                .map_err(ToolchangeError::in_phase(phase))?;
        } else {
            crate::log_info!("{}: built-in unload from {}", phase, self.position);
            self.position = self
                .actuator
                .unload_builtin(self.position, request)
                .map_err(ToolchangeError::in_phase(phase))?;
        }

        Ok(self.position)
    }

    /// Unload with a `KEY=VALUE` argument line
    ///
    /// `FILAMENT_POS` replaces the tracked position; absent means `UNLOADED`.
    pub fn unload_command(&mut self, line: &str) -> Result<FilamentPosition> {
        let args = self.apply_args(line, SequencePhase::UnloadSequence)?;
        self.unload_sequence(&args.unload_request())
    }

    /// POST_UNLOAD: hook only
    pub fn post_unload(&mut self) -> Result<()> {
        let phase = SequencePhase::PostUnload;
        if !self.begin(phase, Callbacks::POST_UNLOAD) {
            return Ok(());
        }

        let mut host = MotionStateGuard::acquire(&mut self.host);
        run_hook(&mut *host, self.config.hooks.post_unload.as_deref())
            .map_err(ToolchangeError::in_phase(phase))?;
        host.release().map_err(ToolchangeError::in_phase(phase))?;

        crate::log_debug!("{} done", phase);
        Ok(())
    }

    /// PRE_LOAD: auto-home, save position, park, hook
    ///
    /// Independent of the unload phases so a load can run on its own.
    pub fn pre_load(&mut self, context: &SessionContext) -> Result<()> {
        let phase = SequencePhase::PreLoad;
        if !self.begin(phase, Callbacks::PRE_LOAD) {
            return Ok(());
        }

        let params = &self.config.park;
        let mut host = MotionStateGuard::acquire(&mut self.host);
        self.park
            .auto_home(&mut *host, params)
            .map_err(ToolchangeError::in_phase(phase))?;
        self.park.save_position(&mut *host);
        self.park
            .park(&mut *host, params, &self.config.hooks, context, None)
            .map_err(ToolchangeError::in_phase(phase))?;
        run_hook(&mut *host, self.config.hooks.pre_load.as_deref())
            .map_err(ToolchangeError::in_phase(phase))?;
        host.release().map_err(ToolchangeError::in_phase(phase))?;

        crate::log_debug!("{} done", phase);
        Ok(())
    }

    /// Load the filament
    ///
    /// Returns the filament position reported by the last step.
    pub fn load_sequence(&mut self, request: &LoadRequest) -> Result<FilamentPosition> {
        let phase = SequencePhase::LoadSequence;

        if self.config.sequence.advanced_load {
            let plan =
                plan_load(self.position, request).map_err(ToolchangeError::in_phase(phase))?;
            crate::log_info!("{}: {} steps from {}", phase, plan.len(), self.position);
            run_plan(&mut self.actuator, &mut self.position, &plan)
                .map_err(ToolchangeError::in_phase(phase))?;
        } else {
            crate::log_info!("{}: built-in load from {}", phase, self.position);
            self.position = self
                .actuator
                .load_builtin(self.position, request)
                .map_err(ToolchangeError::in_phase(phase))?;
        }

        Ok(self.position)
    }

    /// Load with a `KEY=VALUE` argument line
    ///
    /// `FILAMENT_POS` replaces the tracked position; absent means `UNLOADED`.
    pub fn load_command(&mut self, line: &str) -> Result<FilamentPosition> {
        let args = self.apply_args(line, SequencePhase::LoadSequence)?;
        self.load_sequence(&args.load_request())
    }

    /// POST_LOAD: timelapse frame, hook, restore position
    ///
    /// When the MMU is paused the restore is left to the resume path and
    /// the park state is kept.
    pub fn post_load(&mut self, context: &SessionContext) -> Result<()> {
        let phase = SequencePhase::PostLoad;
        if !self.begin(phase, Callbacks::POST_LOAD) {
            return Ok(());
        }

        let mut host = MotionStateGuard::acquire(&mut self.host);
        if self.config.sequence.timelapse {
            host.capture_frame()
                .map_err(ToolchangeError::in_phase(phase))?;
        }
        run_hook(&mut *host, self.config.hooks.post_load.as_deref())
            .map_err(ToolchangeError::in_phase(phase))?;
        if context.mmu_paused {
            crate::log_warn!("MMU paused, position restore deferred to resume");
        } else {
            self.park
                .restore_position(&mut *host, &self.config.park, context)
                .map_err(ToolchangeError::in_phase(phase))?;
        }
        host.release().map_err(ToolchangeError::in_phase(phase))?;

        crate::log_debug!("{} done", phase);
        Ok(())
    }

    /// Run a complete toolchange, stopping at the first error
    ///
    /// The unload half is skipped when the filament is already unloaded.
    /// The tip-forming park position replaces `unload.park_pos` when a tip
    /// was formed.
    pub fn toolchange(
        &mut self,
        context: &SessionContext,
        unload: &UnloadRequest,
        load: &LoadRequest,
    ) -> Result<FilamentPosition> {
        crate::log_info!("Toolchange from {}", self.position);

        if self.position == FilamentPosition::Unloaded {
            crate::log_debug!("Filament already unloaded, unload skipped");
        } else {
            self.pre_unload(context)?;
            let park_pos = self.form_tip()?.unwrap_or(unload.park_pos);
            self.post_form_tip(context)?;
            self.unload_sequence(&UnloadRequest { park_pos, ..*unload })?;
            self.post_unload()?;
        }

        self.pre_load(context)?;
        self.load_sequence(load)?;
        self.post_load(context)?;

        crate::log_info!("Toolchange complete, filament at {}", self.position);
        Ok(self.position)
    }

    fn begin(&self, phase: SequencePhase, callback: Callbacks) -> bool {
        if self.config.sequence.enabled(callback) {
            crate::log_info!("{}", phase);
            true
        } else {
            crate::log_debug!("{} not defined, skipped", phase);
            false
        }
    }

    fn apply_args(&mut self, line: &str, phase: SequencePhase) -> Result<SequenceArgs> {
        let args = SequenceArgs::parse(line).map_err(ToolchangeError::in_phase(phase))?;
        self.position = args.position();
        Ok(args)
    }
}

fn run_hook<H: PrinterHost + ?Sized>(host: &mut H, hook: Option<&str>) -> HostResult<()> {
    match hook {
        Some(script) => host.run_script(script),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filament::{FilamentStep, SequenceError};
    use crate::core::motion::Xyz;
    use crate::core::parameters::{HookBody, HookParams, SequenceParams};
    use crate::platform::mock::{ActuatorCall, MockActuator, MockPrinterHost};
    use crate::platform::{HostError, MotionState, MoveTarget};
    use crate::sequence::ToolchangeErrorKind;

    type Orchestrator = SequenceOrchestrator<MockPrinterHost, MockActuator>;

    fn hook(body: &str) -> Option<HookBody> {
        HookBody::try_from(body).ok()
    }

    fn advanced_config() -> SequenceConfig {
        SequenceConfig {
            sequence: SequenceParams {
                advanced_load: true,
                advanced_unload: true,
                ..SequenceParams::default()
            },
            ..SequenceConfig::default()
        }
    }

    fn orchestrator(config: SequenceConfig, position: FilamentPosition) -> Orchestrator {
        let mut orchestrator =
            SequenceOrchestrator::new(MockPrinterHost::new(), MockActuator::new(position), config);
        orchestrator.set_position(position);
        orchestrator
    }

    fn user_state() -> MotionState {
        MotionState {
            absolute_coord: false,
            absolute_extrude: false,
            speed_factor: 1.2,
            ..MotionState::default()
        }
    }

    fn moves(orchestrator: &Orchestrator) -> std::vec::Vec<MoveTarget> {
        orchestrator.host().moves().copied().collect()
    }

    #[test]
    fn test_pre_unload_saves_parks_and_runs_hook() {
        let mut config = advanced_config();
        config.hooks.pre_unload = hook("M117 unloading");
        let mut orchestrator = orchestrator(config, FilamentPosition::Loaded);
        orchestrator.host_mut().set_motion_state(user_state());

        orchestrator.pre_unload(&SessionContext::printing()).unwrap();

        let park = &orchestrator.park().state();
        assert_eq!(park.saved, Some(Xyz::new(100.0, 100.0, 10.0)));
        assert_eq!(
            moves(&orchestrator),
            [MoveTarget::z(11.0), MoveTarget::xy(Xy::new(50.0, 50.0))]
        );
        assert_eq!(
            orchestrator.host().scripts().collect::<std::vec::Vec<_>>(),
            ["M117 unloading"]
        );
        assert_eq!(orchestrator.host().motion_state(), user_state());
    }

    #[test]
    fn test_park_deferred_until_after_tip_forming() {
        let mut config = advanced_config();
        config.park.park_after_form_tip = true;
        let mut orchestrator = orchestrator(config, FilamentPosition::Loaded);
        let context = SessionContext::printing();

        orchestrator.pre_unload(&context).unwrap();
        assert_eq!(moves(&orchestrator).len(), 0);
        assert!(orchestrator.park().state().has_saved_position());

        orchestrator.form_tip().unwrap();
        orchestrator.post_form_tip(&context).unwrap();
        assert_eq!(moves(&orchestrator).len(), 2);
    }

    #[test]
    fn test_post_form_tip_does_not_park_twice() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Loaded);
        let context = SessionContext::printing();

        orchestrator.pre_unload(&context).unwrap();
        orchestrator.post_form_tip(&context).unwrap();

        assert_eq!(moves(&orchestrator).len(), 2);
    }

    #[test]
    fn test_disabled_callback_is_skipped() {
        let mut config = advanced_config();
        config.sequence.callbacks = Callbacks::all() - Callbacks::PRE_UNLOAD;
        config.hooks.pre_unload = hook("NEVER");
        let mut orchestrator = orchestrator(config, FilamentPosition::Loaded);

        orchestrator.pre_unload(&SessionContext::printing()).unwrap();

        assert!(orchestrator.host().commands().is_empty());
        assert!(!orchestrator.park().state().has_saved_position());
    }

    #[test]
    fn test_form_tip_skipped_outside_extruder() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::EndBowden);
        assert_eq!(orchestrator.form_tip(), Ok(None));
        assert!(orchestrator.actuator().calls().is_empty());

        orchestrator.set_position(FilamentPosition::Loaded);
        orchestrator.actuator_mut().set_tip_park_pos(8.5);
        assert_eq!(orchestrator.form_tip(), Ok(Some(8.5)));
    }

    #[test]
    fn test_advanced_unload_from_past_extruder() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::PastExtruder);

        let position = orchestrator
            .unload_sequence(&UnloadRequest {
                length: 650.0,
                park_pos: 10.0,
                ..UnloadRequest::default()
            })
            .unwrap();

        assert_eq!(position, FilamentPosition::Unloaded);
        assert_eq!(
            orchestrator.actuator().steps().copied().collect::<std::vec::Vec<_>>(),
            [
                FilamentStep::UnloadToolhead {
                    extruder_only: false,
                    park_pos: 10.0
                },
                FilamentStep::UnloadBowden {
                    full: true,
                    length: 650.0
                },
                FilamentStep::UnloadGate { full: false },
            ]
        );
    }

    #[test]
    fn test_unload_when_already_unloaded_attempts_nothing() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Unloaded);

        let error = orchestrator
            .unload_sequence(&UnloadRequest::default())
            .unwrap_err();

        assert_eq!(error.phase, SequencePhase::UnloadSequence);
        assert_eq!(
            error.kind,
            ToolchangeErrorKind::Sequence(SequenceError::AlreadyUnloaded)
        );
        assert!(orchestrator.actuator().calls().is_empty());
    }

    #[test]
    fn test_builtin_sequencing_when_advanced_disabled() {
        let mut orchestrator = orchestrator(SequenceConfig::default(), FilamentPosition::Loaded);

        orchestrator
            .unload_sequence(&UnloadRequest::default())
            .unwrap();
        orchestrator.load_sequence(&LoadRequest::default()).unwrap();

        assert_eq!(
            orchestrator.actuator().calls(),
            &[ActuatorCall::UnloadBuiltin, ActuatorCall::LoadBuiltin]
        );
        assert_eq!(orchestrator.position(), FilamentPosition::Loaded);
    }

    #[test]
    fn test_load_already_in_extruder() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::InExtruder);

        let error = orchestrator
            .load_sequence(&LoadRequest::default())
            .unwrap_err();

        assert_eq!(error.phase, SequencePhase::LoadSequence);
        assert_eq!(
            error.kind,
            ToolchangeErrorKind::Sequence(SequenceError::AlreadyInExtruder(
                FilamentPosition::InExtruder
            ))
        );
        assert!(orchestrator.actuator().calls().is_empty());
    }

    #[test]
    fn test_load_step_failure_keeps_progress() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Unloaded);
        orchestrator.actuator_mut().fail_on("home extruder");

        let error = orchestrator
            .load_sequence(&LoadRequest {
                home_extruder: true,
                ..LoadRequest::default()
            })
            .unwrap_err();

        assert_eq!(
            error.kind,
            ToolchangeErrorKind::Host(HostError::ActuatorFailed("home extruder"))
        );
        assert_eq!(orchestrator.position(), FilamentPosition::EndBowden);
    }

    #[test]
    fn test_commands_parse_arguments() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Unknown);

        let position = orchestrator
            .unload_command("FILAMENT_POS=2 LENGTH=600")
            .unwrap();
        assert_eq!(position, FilamentPosition::Unloaded);
        assert_eq!(
            orchestrator.actuator().steps().copied().collect::<std::vec::Vec<_>>(),
            [FilamentStep::UnloadGate { full: true }]
        );

        let position = orchestrator
            .load_command("LENGTH=600 HOME_EXTRUDER=1 SKIP_EXTRUDER=1")
            .unwrap();
        assert_eq!(position, FilamentPosition::HomedExtruder);

        let error = orchestrator.load_command("SPEED=20").unwrap_err();
        assert_eq!(
            error.kind,
            ToolchangeErrorKind::Sequence(SequenceError::UnknownArgument)
        );
    }

    #[test]
    fn test_unload_command_without_position_means_unloaded() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Loaded);

        let error = orchestrator.unload_command("").unwrap_err();

        assert_eq!(error.phase, SequencePhase::UnloadSequence);
        assert_eq!(
            error.kind,
            ToolchangeErrorKind::Sequence(SequenceError::AlreadyUnloaded)
        );
        assert_eq!(orchestrator.position(), FilamentPosition::Unloaded);
        assert_eq!(orchestrator.actuator().steps().count(), 0);
    }

    #[test]
    fn test_post_load_restores_and_clears() {
        let mut config = advanced_config();
        config.sequence.timelapse = true;
        config.hooks.post_load = hook("M117 loaded");
        let mut orchestrator = orchestrator(config, FilamentPosition::Unloaded);
        let context = SessionContext::printing();

        orchestrator.pre_load(&context).unwrap();
        orchestrator.host_mut().clear_log();
        orchestrator.post_load(&context).unwrap();

        let host = orchestrator.host();
        assert_eq!(host.position(), Xyz::new(100.0, 100.0, 10.0));
        assert!(host
            .commands()
            .contains(&crate::platform::mock::HostCommand::CaptureFrame));
        assert_eq!(host.scripts().collect::<std::vec::Vec<_>>(), ["M117 loaded"]);
        assert!(!orchestrator.park().state().has_saved_position());
    }

    #[test]
    fn test_post_load_paused_defers_restore() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Unloaded);
        let context = SessionContext::printing();
        orchestrator.pre_load(&context).unwrap();
        orchestrator.host_mut().clear_log();

        let paused = SessionContext {
            mmu_paused: true,
            ..context
        };
        orchestrator.post_load(&paused).unwrap();

        assert_eq!(moves(&orchestrator).len(), 0);
        assert!(orchestrator.park().state().has_saved_position());

        // The resume path restores explicitly
        orchestrator.restore_position(&context).unwrap();
        assert_eq!(
            orchestrator.host().position(),
            Xyz::new(100.0, 100.0, 10.0)
        );
        assert!(!orchestrator.park().state().has_saved_position());
    }

    #[test]
    fn test_hook_failure_restores_state_and_keeps_park_state() {
        let mut config = advanced_config();
        config.hooks = HookParams {
            pre_load: hook("PURGE"),
            ..HookParams::default()
        };
        let mut orchestrator = orchestrator(config, FilamentPosition::Unloaded);
        orchestrator.host_mut().set_motion_state(user_state());
        orchestrator.host_mut().fail_scripts(true);

        let error = orchestrator
            .pre_load(&SessionContext::printing())
            .unwrap_err();

        assert_eq!(error.phase, SequencePhase::PreLoad);
        assert_eq!(error.kind, ToolchangeErrorKind::Host(HostError::ScriptFailed));
        assert_eq!(orchestrator.host().motion_state(), user_state());
        assert!(orchestrator.park().state().has_saved_position());
    }

    #[test]
    fn test_toolchange_round_trip() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Loaded);
        orchestrator.host_mut().set_position(Xyz::new(60.0, 70.0, 2.4));
        orchestrator.actuator_mut().set_tip_park_pos(12.0);

        let position = orchestrator
            .toolchange(
                &SessionContext::printing(),
                &UnloadRequest::default(),
                &LoadRequest {
                    home_extruder: true,
                    ..LoadRequest::default()
                },
            )
            .unwrap();

        assert_eq!(position, FilamentPosition::Loaded);
        assert_eq!(orchestrator.host().position(), Xyz::new(60.0, 70.0, 2.4));
        assert!(orchestrator.actuator().steps().any(|step| matches!(
            step,
            FilamentStep::UnloadToolhead { park_pos, .. } if *park_pos == 12.0
        )));
        assert_eq!(orchestrator.park().state().initial_park_z, None);
    }

    #[test]
    fn test_toolchange_from_unloaded_skips_unload() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Unloaded);

        orchestrator
            .toolchange(
                &SessionContext::standalone(),
                &UnloadRequest::default(),
                &LoadRequest::default(),
            )
            .unwrap();

        assert!(!orchestrator
            .actuator()
            .calls()
            .contains(&ActuatorCall::FormTip));
        assert_eq!(orchestrator.actuator().steps().count(), 3);
    }

    #[test]
    fn test_layer_change_raises_park_height() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Loaded);
        orchestrator.host_mut().set_position(Xyz::new(100.0, 100.0, 0.4));
        orchestrator.on_layer_change(25.0);

        orchestrator.pre_unload(&SessionContext::printing()).unwrap();

        assert_eq!(moves(&orchestrator)[0], MoveTarget::z(26.0));
    }

    #[test]
    fn test_stale_next_position_is_dropped() {
        let mut orchestrator = orchestrator(advanced_config(), FilamentPosition::Loaded);
        orchestrator.set_next_position(Xy::new(10.0, 20.0));
        orchestrator.clear_position();
        assert_eq!(orchestrator.park().state().next, None);
    }
}
