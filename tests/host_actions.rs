//! End-to-end checks of the public façade against a mock backend.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use webinput::buttons::default_buttons;
use webinput::platform::keycodes;
use webinput::platform::DelayTable;
use webinput::{
    parse_wire, BackendKind, Clipboard, ClipboardError, Config, HostActions, InputBackend,
    MouseButton, NativeKeyCode, Os, PlatformError, PlatformProfile, SequenceExecutor,
    StaticButtons,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Down(NativeKeyCode),
    Up(NativeKeyCode),
    Press(NativeKeyCode),
    Move(i32, i32),
    Click(MouseButton),
}

/// Logs every event into a shared vector; rejects key presses of
/// `reject` when set.
#[derive(Clone, Default)]
struct MockBackend {
    events: Rc<RefCell<Vec<Event>>>,
    reject: Option<NativeKeyCode>,
}

impl MockBackend {
    fn push(&self, event: Event) -> Result<(), PlatformError> {
        if let Event::Press(code) = &event {
            if self.reject == Some(*code) {
                return Err(PlatformError::Injection("press rejected".into()));
            }
        }
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl InputBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::GenericInjection
    }
    fn key_down(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.push(Event::Down(key))
    }
    fn key_up(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.push(Event::Up(key))
    }
    fn press_key(&mut self, key: NativeKeyCode) -> Result<(), PlatformError> {
        self.push(Event::Press(key))
    }
    fn move_relative(&mut self, dx: i32, dy: i32) -> Result<(), PlatformError> {
        self.push(Event::Move(dx, dy))
    }
    fn click(&mut self, button: MouseButton) -> Result<(), PlatformError> {
        self.push(Event::Click(button))
    }
}

#[derive(Clone, Default)]
struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.borrow_mut() = Some(text.to_owned());
        Ok(())
    }
}

fn code(token: &str) -> NativeKeyCode {
    keycodes::resolve(token, BackendKind::GenericInjection).unwrap()
}

fn quiet(os: Os) -> PlatformProfile {
    PlatformProfile::for_os(os).with_delays(DelayTable::uniform(Duration::ZERO))
}

fn host(os: Os, backend: MockBackend, clipboard: MemoryClipboard, config: &Config) -> HostActions {
    let profile = quiet(os);
    let buttons = if config.buttons.is_empty() {
        default_buttons(&profile)
    } else {
        config.buttons.clone()
    };
    HostActions::new(
        profile,
        Ok(Box::new(backend)),
        Box::new(clipboard),
        Box::new(StaticButtons::new(buttons)),
    )
}

#[test]
fn select_all_chord_from_wire_json() {
    let backend = MockBackend::default();
    let events = Rc::clone(&backend.events);
    let mut host = host(Os::Windows, backend, MemoryClipboard::default(), &Config::default());

    let seq = parse_wire(r#"[["ctrl","down"],["a","press"],["ctrl","up"]]"#).unwrap();
    assert!(host.execute_sequence(&seq).success);
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Down(code("ctrl")),
            Event::Press(code("a")),
            Event::Up(code("ctrl")),
        ]
    );
}

#[test]
fn unknown_key_releases_held_modifiers() {
    let backend = MockBackend::default();
    let events = Rc::clone(&backend.events);
    let mut host = host(Os::Linux, backend, MemoryClipboard::default(), &Config::default());

    let seq = parse_wire(r#"[["ctrl","down"],["shift","down"],["ß","press"]]"#).unwrap();
    let report = host.execute_sequence_report(&seq);
    assert!(!report.success);
    assert_eq!(report.failed_step, Some(2));
    assert!(report.left_held.is_empty());
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Down(code("ctrl")),
            Event::Down(code("shift")),
            Event::Up(code("shift")),
            Event::Up(code("ctrl")),
        ]
    );
}

#[test]
fn rejected_press_still_releases_modifier() {
    let backend = MockBackend {
        reject: Some(code("enter")),
        ..MockBackend::default()
    };
    let events = Rc::clone(&backend.events);
    let mut host = host(Os::Linux, backend, MemoryClipboard::default(), &Config::default());

    assert!(!host.press_button("accept").success);
    assert_eq!(
        *events.borrow(),
        vec![Event::Down(code("ctrl")), Event::Up(code("ctrl"))]
    );
}

#[test]
fn paste_on_macos_uses_cmd() {
    let backend = MockBackend::default();
    let events = Rc::clone(&backend.events);
    let clipboard = MemoryClipboard::default();
    let contents = Rc::clone(&clipboard.contents);
    let mut host = host(Os::MacOs, backend, clipboard, &Config::default());

    assert!(host.execute_paste("draft reply").success);
    assert_eq!(contents.borrow().as_deref(), Some("draft reply"));
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Down(code("cmd")),
            Event::Press(code("v")),
            Event::Up(code("cmd")),
        ]
    );
}

#[test]
fn buttons_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        backend = "injection"

        [delays]
        press_ms = 0

        [[buttons]]
        id = "undo"
        name = "Undo"
        key_sequence = [["ctrl", "down"], ["z", "press"], ["ctrl", "up"]]
        "#,
    )
    .unwrap();
    let config = Config::load(&path).unwrap();

    let backend = MockBackend::default();
    let events = Rc::clone(&backend.events);
    let mut host = host(Os::Linux, backend, MemoryClipboard::default(), &config);

    assert!(host.press_button("undo").success);
    assert!(!host.press_button("paste").success);
    assert_eq!(events.borrow().len(), 3);
    assert_eq!(events.borrow()[1], Event::Press(code("z")));
}

#[test]
fn invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "backend = \"uinput\"\n").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn mouse_move_and_click() {
    let backend = MockBackend::default();
    let events = Rc::clone(&backend.events);
    let mut host = host(Os::Linux, backend, MemoryClipboard::default(), &Config::default());

    assert!(host.move_mouse(-10, 4).success);
    assert!(host.move_mouse(0, 0).success);
    assert!(host.click_mouse(MouseButton::Middle).success);
    assert_eq!(
        *events.borrow(),
        vec![
            Event::Move(-10, 4),
            Event::Move(0, 0),
            Event::Click(MouseButton::Middle),
        ]
    );
}

#[test]
fn executor_is_usable_directly() {
    let profile = quiet(Os::Linux);
    let mut backend = MockBackend::default();
    let executor = SequenceExecutor::new(&profile);

    assert!(executor.execute(&mut backend, &[]));
    let seq = parse_wire(r#"[["shift","down"],["tab","press"]]"#).unwrap();
    let report = executor.run(&mut backend, &seq);
    assert!(report.success);
    assert_eq!(report.left_held, vec!["shift".to_owned()]);
}

#[test]
fn delays_are_applied_between_steps() {
    let profile = PlatformProfile::for_os(Os::Linux)
        .with_delays(DelayTable::uniform(Duration::from_millis(20)));
    let mut backend = MockBackend::default();
    let seq = parse_wire(r#"[["alt","down"],["f","press"],["alt","up"]]"#).unwrap();

    let started = std::time::Instant::now();
    assert!(SequenceExecutor::new(&profile).execute(&mut backend, &seq));
    assert!(started.elapsed() >= Duration::from_millis(60));
}
