use std::sync::mpsc;
use std::thread::JoinHandle;

use crate::foundation::error::{GridshotError, GridshotResult};
use crate::foundation::pixmap::Pixmap;
use crate::render::surface::{Renderer, Surface};

enum HostRequest {
    Render {
        origin_x: u32,
        origin_y: u32,
        width: u32,
        height: u32,
        reply: mpsc::SyncSender<GridshotResult<Pixmap>>,
    },
    Shutdown,
}

/// Handle to a surface living on its owning thread.
///
/// Carries the dimensions observed when the host was spawned; the surface itself never
/// leaves the owner thread.
#[derive(Clone, Copy, Debug)]
pub struct HostSurface {
    width: u32,
    height: u32,
}

impl Surface for HostSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Runs a surface and its renderer on a dedicated owner thread.
///
/// Renderers are only sound on the thread that owns their surface, but the capture driver
/// often runs on a worker thread. `SurfaceHost` spawns the owner thread, constructs the
/// surface and renderer there (so neither needs to be `Send`), and services render
/// requests over a rendezvous channel; the calling worker blocks until the owner thread
/// has finished each call. Dropping the host shuts the owner thread down.
pub struct SurfaceHost {
    tx: mpsc::Sender<HostRequest>,
    thread: Option<JoinHandle<()>>,
    surface: HostSurface,
}

impl SurfaceHost {
    /// Spawn the owner thread and build the surface and renderer on it.
    ///
    /// Fails if `build` fails; the build error is forwarded to the caller.
    pub fn spawn<S, R, F>(build: F) -> GridshotResult<Self>
    where
        S: Surface + 'static,
        R: Renderer<S> + 'static,
        F: FnOnce() -> GridshotResult<(S, R)> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<HostRequest>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<GridshotResult<(u32, u32)>>(0);

        let thread = std::thread::Builder::new()
            .name("gridshot-surface-host".to_owned())
            .spawn(move || {
                let (surface, mut renderer) = match build() {
                    Ok(pair) => {
                        let dims = (pair.0.width(), pair.0.height());
                        if ready_tx.send(Ok(dims)).is_err() {
                            return;
                        }
                        pair
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                while let Ok(req) = rx.recv() {
                    match req {
                        HostRequest::Render {
                            origin_x,
                            origin_y,
                            width,
                            height,
                            reply,
                        } => {
                            let rendered = Pixmap::new(width, height).and_then(|mut target| {
                                renderer
                                    .render(&surface, origin_x, origin_y, &mut target)
                                    .map(|()| target)
                            });
                            let _ = reply.send(rendered);
                        }
                        HostRequest::Shutdown => break,
                    }
                }
            })
            .map_err(|e| {
                GridshotError::capture(format!("failed to spawn surface host thread: {e}"))
            })?;

        let dims = ready_rx
            .recv()
            .map_err(|_| GridshotError::capture("surface host thread exited before it was ready"));
        let (width, height) = match dims {
            Ok(Ok(d)) => d,
            Ok(Err(e)) | Err(e) => {
                let _ = thread.join();
                return Err(e);
            }
        };

        Ok(Self {
            tx,
            thread: Some(thread),
            surface: HostSurface { width, height },
        })
    }

    /// Surface handle to capture against.
    pub fn surface(&self) -> HostSurface {
        self.surface
    }
}

impl Renderer<HostSurface> for SurfaceHost {
    fn render(
        &mut self,
        _surface: &HostSurface,
        origin_x: u32,
        origin_y: u32,
        target: &mut Pixmap,
    ) -> GridshotResult<()> {
        let (reply_tx, reply_rx) = mpsc::sync_channel(0);
        self.tx
            .send(HostRequest::Render {
                origin_x,
                origin_y,
                width: target.width(),
                height: target.height(),
                reply: reply_tx,
            })
            .map_err(|_| GridshotError::capture("surface host thread is gone"))?;

        let rendered = reply_rx
            .recv()
            .map_err(|_| GridshotError::capture("surface host dropped a render request"))??;
        target.blit(&rendered, 0, 0);
        Ok(())
    }
}

impl Drop for SurfaceHost {
    fn drop(&mut self) {
        let _ = self.tx.send(HostRequest::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/host.rs"]
mod tests;
