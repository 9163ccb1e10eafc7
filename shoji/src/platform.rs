use std::io::{self, Write};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use shoji_config::{Instruction, WindowGeometry};

use crate::core::{MonitorId, WindowId};

/// Seam to the window-system collaborator. Resolved instructions go out
/// over this trait; command spawning stays inside the core (fire-and-forget,
/// the collaborator never sees it). This abstraction allows mocking in tests.
pub trait WindowHost {
    fn apply_geometries(&mut self, monitor: MonitorId, geometries: Vec<WindowGeometry>);
    fn focus_window(&mut self, id: WindowId);
    fn close_window(&mut self, id: WindowId);
    /// The last input event matched no binding; default handling applies.
    fn forward_event(&mut self);
    fn shutdown(&mut self);
    fn spawn_command(&self, argv: &[String]);
}

/// Production host: one JSON instruction per line on stdout, mirroring the
/// event stream arriving on stdin.
pub struct StdioHost {
    stdout: io::Stdout,
}

impl StdioHost {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    fn emit(&mut self, instruction: &Instruction) {
        let mut out = self.stdout.lock();
        if let Err(e) = serde_json::to_writer(&mut out, instruction) {
            tracing::error!("Failed to serialize instruction: {}", e);
            return;
        }
        if writeln!(out).and_then(|_| out.flush()).is_err() {
            tracing::error!("Failed to write instruction to stdout");
        }
    }
}

impl Default for StdioHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowHost for StdioHost {
    fn apply_geometries(&mut self, monitor: MonitorId, geometries: Vec<WindowGeometry>) {
        self.emit(&Instruction::ApplyGeometries {
            monitor,
            geometries,
        });
    }

    fn focus_window(&mut self, id: WindowId) {
        self.emit(&Instruction::FocusWindow { id });
    }

    fn close_window(&mut self, id: WindowId) {
        self.emit(&Instruction::CloseWindow { id });
    }

    fn forward_event(&mut self) {
        self.emit(&Instruction::Forward);
    }

    fn shutdown(&mut self) {
        self.emit(&Instruction::Shutdown);
    }

    fn spawn_command(&self, argv: &[String]) {
        // Spawn failures are logged, never surfaced: the core does not
        // supervise or retry external commands.
        if let Err(e) = spawn_detached(argv) {
            tracing::warn!("Spawn failed: {}", e);
        }
    }
}

/// Launch a command from its argument vector, detached into its own
/// session so it outlives the core.
pub fn spawn_detached(argv: &[String]) -> Result<(), String> {
    let (program, args) = argv.split_first().ok_or("empty argument vector")?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    unsafe {
        command.pre_exec(|| {
            let _ = nix::unistd::setsid();
            Ok(())
        });
    }

    match command.spawn() {
        Ok(child) => {
            tracing::info!("Spawned {:?} (pid={})", program, child.id());
            Ok(())
        }
        Err(e) => Err(format!("Failed to spawn {:?}: {}", program, e)),
    }
}
