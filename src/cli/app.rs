//! Console runner: show one toast and report how the user reacted

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use crate::application::ports::{ConfigStore, NotificationBackend, RegistryStore, ShellLinkStore};
use crate::application::{Activation, Toaster};
use crate::domain::config::ToastConfig;
use crate::domain::identity::ShortcutResult;
use crate::domain::template::{TemplateType, ToastTemplate};
use crate::infrastructure::{create_toaster, XdgConfigStore};

use super::args::{Cli, ToastOptions};
use super::presenter::{format_wait, Presenter};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
/// `--only-create-shortcut` combined with toast content
pub const EXIT_SHORTCUT_CONFLICT: u8 = 9;
/// An action button was clicked
pub const EXIT_ACTION_CLICKED: u8 = 16;
/// Non-zero shortcut results exit with this base plus the result code
const SHORTCUT_EXIT_BASE: i32 = 16;

/// Extra time given to the user after an expiring toast is gone
const EXPIRATION_GRACE: Duration = Duration::from_millis(1000);

/// Outcome of a console run, reported as the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    ToastClicked = 0,
    ToastNotActivated = 1,
    ToastFailed = 2,
    SystemNotSupported = 3,
    UnhandledOption = 4,
    MultipleTextNotSupported = 5,
    InitializationFailure = 6,
    ToastNotLaunched = 7,
}

impl RunOutcome {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<RunOutcome> for ExitCode {
    fn from(outcome: RunOutcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Run the console sample for parsed arguments.
///
/// `relaunched` is set when the OS started the process to deliver a toast
/// click; the toaster is then initialized and waits for that activation
/// instead of showing a new toast.
pub async fn run(cli: Cli, relaunched: bool) -> ExitCode {
    let mut presenter = Presenter::new();

    if cli.text.len() > 1 {
        presenter.error("Only one --text may be given");
        return RunOutcome::MultipleTextNotSupported.into();
    }

    if cli.only_create_shortcut && cli.has_toast_content() {
        presenter.error(
            "--only-create-shortcut does not accept images/text/actions/expiration",
        );
        return ExitCode::from(EXIT_SHORTCUT_CONFLICT);
    }

    let config = load_merged_config(&XdgConfigStore::new(), cli.config_overrides()).await;

    let mut toaster = create_toaster();
    if !toaster.is_compatible() {
        presenter.error("Error, your system is not supported!");
        return RunOutcome::SystemNotSupported.into();
    }
    configure(&mut toaster, &config);

    let code = if cli.only_create_shortcut {
        create_shortcut_only(&toaster, &presenter)
    } else if relaunched {
        wait_after_relaunch(&mut toaster, config.wait_secs_or_default(), &mut presenter).await
    } else {
        let options = ToastOptions::from(&cli);
        let wait = wait_duration(&options, config.wait_secs_or_default());
        match prepare_toast(&mut toaster, &options, &presenter) {
            Ok(()) => wait_for_activation(&mut toaster, wait, &mut presenter).await,
            Err(code) => code,
        }
    };

    ExitCode::from(code)
}

/// Apply the merged config to a fresh toaster
pub fn configure<B, L, R>(toaster: &mut Toaster<B, L, R>, config: &ToastConfig)
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    toaster
        .set_identity(config.identity())
        .set_shortcut_policy(config.shortcut_policy_or_default())
        .set_activation_handler(|arguments, user_input| {
            tracing::info!(%arguments, inputs = user_input.len(), "Toast activated");
        });
}

/// Validate or create the shortcut and map the result to an exit code
pub fn create_shortcut_only<B, L, R>(toaster: &Toaster<B, L, R>, presenter: &Presenter) -> u8
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    let result = toaster.create_shortcut();
    if result.is_success() {
        presenter.success(&format!("Start menu {}", result));
    } else {
        presenter.error(&format!("Start menu {}", result));
    }
    shortcut_exit_code(result)
}

/// `0` for an untouched shortcut, otherwise `16 + result code`
pub fn shortcut_exit_code(result: ShortcutResult) -> u8 {
    match result.code() {
        0 => EXIT_SUCCESS,
        code => u8::try_from(SHORTCUT_EXIT_BASE + code).unwrap_or(EXIT_ERROR),
    }
}

/// Template for the console toast: one line of text, optional image,
/// attribution, audio, actions and expiration
pub fn build_template(options: &ToastOptions) -> ToastTemplate {
    let kind = if options.image.is_some() {
        TemplateType::ImageAndText02
    } else {
        TemplateType::Text02
    };

    let mut template = ToastTemplate::new(kind);
    template
        .set_first_line(options.text.as_str())
        .set_audio_option(options.audio)
        .set_attribution_text(options.attribution.as_str());

    for action in &options.actions {
        template.add_action(action.as_str());
    }
    if options.expire_ms > 0 {
        template.set_expiration(i64::try_from(options.expire_ms).unwrap_or(i64::MAX));
    }
    if let Some(image) = &options.image {
        template.set_image_path(image.as_str());
    }
    template
}

/// How long to wait for the user: the expiration plus a grace period, or the
/// configured wait
pub fn wait_duration(options: &ToastOptions, wait_secs: u64) -> Duration {
    if options.expire_ms > 0 {
        Duration::from_millis(options.expire_ms).saturating_add(EXPIRATION_GRACE)
    } else {
        Duration::from_secs(wait_secs)
    }
}

/// Initialize the toaster and show the toast
pub fn prepare_toast<B, L, R>(
    toaster: &mut Toaster<B, L, R>,
    options: &ToastOptions,
    presenter: &Presenter,
) -> Result<(), u8>
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    if let Err(e) = toaster.initialize() {
        presenter.toast_error("Error, could not initialize the library", e);
        return Err(RunOutcome::InitializationFailure.code());
    }

    let template = build_template(options);
    match toaster.show(&template) {
        Ok(id) => {
            tracing::debug!(id, "Toast shown");
            Ok(())
        }
        Err(e) => {
            presenter.toast_error("Could not launch your toast notification", e);
            Err(RunOutcome::ToastFailed.code())
        }
    }
}

async fn wait_after_relaunch<B, L, R>(
    toaster: &mut Toaster<B, L, R>,
    wait_secs: u64,
    presenter: &mut Presenter,
) -> u8
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    if let Err(e) = toaster.initialize() {
        presenter.toast_error("Error, could not initialize the library", e);
        return RunOutcome::InitializationFailure.code();
    }
    wait_for_activation(toaster, Duration::from_secs(wait_secs), presenter).await
}

/// Wait for a click, the timeout, or Ctrl+C, then uninstall.
pub async fn wait_for_activation<B, L, R>(
    toaster: &mut Toaster<B, L, R>,
    wait: Duration,
    presenter: &mut Presenter,
) -> u8
where
    B: NotificationBackend,
    L: ShellLinkStore,
    R: RegistryStore,
{
    presenter.start_spinner(&format!(
        "Waiting for the user ({})...",
        format_wait(wait)
    ));

    let code = tokio::select! {
        activation = toaster.next_activation() => match activation {
            Some(activation) => {
                presenter.stop_spinner();
                report_activation(&activation, presenter)
            }
            None => {
                presenter.spinner_fail("Activation channel closed");
                RunOutcome::ToastFailed.code()
            }
        },
        _ = tokio::time::sleep(wait) => {
            presenter.spinner_fail("The toast was not activated in time");
            RunOutcome::ToastFailed.code()
        }
        _ = tokio::signal::ctrl_c() => {
            presenter.spinner_fail("Interrupted");
            RunOutcome::ToastNotActivated.code()
        }
    };

    toaster.uninstall();
    code
}

/// Print what the user clicked and pick the exit code
pub fn report_activation(activation: &Activation, presenter: &Presenter) -> u8 {
    let code = match activation.action_id() {
        Some(action) => {
            presenter.output(&format!("The user clicked on action #{}", action));
            EXIT_ACTION_CLICKED
        }
        None => {
            presenter.output("The user clicked on the toast");
            RunOutcome::ToastClicked.code()
        }
    };
    presenter.user_input(&activation.user_input);
    code
}

/// Identity overrides from the environment
pub fn env_config() -> ToastConfig {
    ToastConfig {
        app_name: env::var("TOASTWIRE_APP_NAME").ok().filter(|s| !s.is_empty()),
        aumi: env::var("TOASTWIRE_AUMI").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: ToastConfig) -> ToastConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring config file {}: {}", store.path().display(), e);
            ToastConfig::empty()
        }
    };

    merge_layers(file_config, env_config(), cli_config)
}

/// Merge: defaults < file < env < cli
pub fn merge_layers(file: ToastConfig, env: ToastConfig, cli: ToastConfig) -> ToastConfig {
    ToastConfig::defaults().merge(file).merge(env).merge(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::UserInput;
    use crate::domain::template::AudioOption;
    use crate::infrastructure::memory::{MemoryBackend, MemoryRegistry, MemoryShellLinks};
    use clap::Parser;

    type MemoryToaster = Toaster<MemoryBackend, MemoryShellLinks, MemoryRegistry>;

    fn options(args: &[&str]) -> ToastOptions {
        let mut argv = vec!["toastwire"];
        argv.extend_from_slice(args);
        ToastOptions::from(&Cli::parse_from(argv))
    }

    fn memory_toaster() -> MemoryToaster {
        let mut toaster = Toaster::new(
            MemoryBackend::new(),
            MemoryShellLinks::new(),
            MemoryRegistry::new(),
        );
        configure(&mut toaster, &ToastConfig::defaults());
        toaster
    }

    #[test]
    fn outcome_codes() {
        assert_eq!(RunOutcome::ToastClicked.code(), 0);
        assert_eq!(RunOutcome::ToastFailed.code(), 2);
        assert_eq!(RunOutcome::UnhandledOption.code(), 4);
        assert_eq!(RunOutcome::ToastNotLaunched.code(), 7);
    }

    #[test]
    fn shortcut_exit_codes() {
        assert_eq!(shortcut_exit_code(ShortcutResult::Unchanged), 0);
        assert_eq!(shortcut_exit_code(ShortcutResult::Changed), 17);
        assert_eq!(shortcut_exit_code(ShortcutResult::Created), 18);
        assert_eq!(shortcut_exit_code(ShortcutResult::MissingParameters), 15);
        assert_eq!(shortcut_exit_code(ShortcutResult::IncompatibleOs), 14);
        assert_eq!(shortcut_exit_code(ShortcutResult::CreateFailed), 13);
    }

    #[test]
    fn template_without_image() {
        let template = build_template(&options(&["--text", "Hi", "--action", "Ok"]));
        assert_eq!(template.kind(), TemplateType::Text02);
        assert_eq!(template.text_fields()[0], "Hi");
        assert_eq!(template.text_fields()[1], "");
        assert_eq!(template.actions(), ["Ok".to_string()]);
        assert_eq!(template.attribution_text(), "default");
        assert_eq!(template.expiration(), 0);
    }

    #[test]
    fn template_with_image_and_expiration() {
        let template = build_template(&options(&[
            "--image",
            "C:\\logo.png",
            "--expirems",
            "2000",
            "--audio-state",
            "1",
        ]));
        assert_eq!(template.kind(), TemplateType::ImageAndText02);
        assert_eq!(template.image_path(), "C:\\logo.png");
        assert_eq!(template.expiration(), 2000);
        assert_eq!(template.audio_option(), AudioOption::Silent);
    }

    #[test]
    fn wait_follows_expiration() {
        assert_eq!(
            wait_duration(&options(&["--expirems", "500"]), 15),
            Duration::from_millis(1500)
        );
        assert_eq!(wait_duration(&options(&[]), 15), Duration::from_secs(15));
    }

    #[test]
    fn layers_merge_in_order() {
        let file = ToastConfig {
            app_name: Some("File".to_string()),
            aumi: Some("File.App".to_string()),
            wait_secs: Some(30),
            ..Default::default()
        };
        let env = ToastConfig {
            aumi: Some("Env.App".to_string()),
            ..Default::default()
        };
        let cli = ToastConfig {
            wait_secs: Some(2),
            ..Default::default()
        };

        let merged = merge_layers(file, env, cli);
        assert_eq!(merged.app_name, Some("File".to_string()));
        assert_eq!(merged.aumi, Some("Env.App".to_string()));
        assert_eq!(merged.wait_secs, Some(2));
        assert_eq!(merged.shortcut_policy, Some("require-create".to_string()));
    }

    #[test]
    fn prepare_shows_one_toast() {
        let mut toaster = memory_toaster();
        prepare_toast(&mut toaster, &options(&["--text", "Hi"]), &Presenter::new()).unwrap();
        assert_eq!(toaster.live_count(), 1);
        assert_eq!(toaster.backend().visible().len(), 1);
    }

    #[test]
    fn prepare_reports_initialization_failure() {
        let mut toaster = memory_toaster();
        toaster.set_aumi("");
        let result = prepare_toast(&mut toaster, &options(&[]), &Presenter::new());
        assert_eq!(result, Err(RunOutcome::InitializationFailure.code()));
    }

    #[tokio::test]
    async fn action_click_exits_with_sixteen() {
        let mut toaster = memory_toaster();
        prepare_toast(&mut toaster, &options(&["--action", "Ok"]), &Presenter::new()).unwrap();
        assert!(toaster.backend().activate("actionId=0", UserInput::new()));

        let code =
            wait_for_activation(&mut toaster, Duration::from_secs(5), &mut Presenter::new()).await;
        assert_eq!(code, EXIT_ACTION_CLICKED);
        assert_eq!(toaster.live_count(), 0);
    }

    #[tokio::test]
    async fn body_click_exits_with_zero() {
        let mut toaster = memory_toaster();
        prepare_toast(&mut toaster, &options(&[]), &Presenter::new()).unwrap();
        assert!(toaster.backend().activate("", UserInput::new()));

        let code =
            wait_for_activation(&mut toaster, Duration::from_secs(5), &mut Presenter::new()).await;
        assert_eq!(code, RunOutcome::ToastClicked.code());
    }

    #[tokio::test]
    async fn timeout_uninstalls_and_fails() {
        let mut toaster = memory_toaster();
        prepare_toast(&mut toaster, &options(&[]), &Presenter::new()).unwrap();

        let code =
            wait_for_activation(&mut toaster, Duration::from_millis(20), &mut Presenter::new())
                .await;
        assert_eq!(code, RunOutcome::ToastFailed.code());
        assert_eq!(
            toaster.backend().history_cleared(),
            vec!["Toastwire.Console".to_string()]
        );
    }
}
