//! Mount guard for one effect surface.
//!
//! Every mount gets a fresh generation. Asynchronous work started by a mount
//! carries its ticket and is discarded if the surface was torn down (or
//! remounted) before it finished.

use crate::error::LifecycleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    Uninitialized,
    /// Surface and camera exist; the image is still loading.
    Initializing,
    /// Quad built and redraw loop running.
    Ready,
    /// Asset load failed; mounted but inert.
    Failed,
    Disposed,
}

impl SurfaceState {
    pub fn is_mounted(self) -> bool {
        matches!(
            self,
            SurfaceState::Initializing | SurfaceState::Ready | SurfaceState::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceState::Uninitialized => "uninitialized",
            SurfaceState::Initializing => "initializing",
            SurfaceState::Ready => "ready",
            SurfaceState::Failed => "failed",
            SurfaceState::Disposed => "disposed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountTicket {
    generation: u64,
}

impl MountTicket {
    #[inline]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug)]
pub struct Lifecycle {
    state: SurfaceState,
    generation: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: SurfaceState::Uninitialized,
            generation: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn begin_mount(&mut self) -> Result<MountTicket, LifecycleError> {
        match self.state {
            SurfaceState::Uninitialized | SurfaceState::Disposed => {
                self.generation += 1;
                self.state = SurfaceState::Initializing;
                Ok(MountTicket {
                    generation: self.generation,
                })
            }
            active => Err(LifecycleError::AlreadyActive(active)),
        }
    }

    #[inline]
    pub fn is_current(&self, ticket: MountTicket) -> bool {
        ticket.generation == self.generation && self.state == SurfaceState::Initializing
    }

    pub fn asset_ready(&mut self, ticket: MountTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = SurfaceState::Ready;
        true
    }

    pub fn asset_failed(&mut self, ticket: MountTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = SurfaceState::Failed;
        true
    }

    /// Returns `true` exactly once per mount; the caller then releases its
    /// platform resources.
    pub fn dispose(&mut self) -> bool {
        if self.state.is_mounted() {
            self.state = SurfaceState::Disposed;
            true
        } else {
            false
        }
    }
}
