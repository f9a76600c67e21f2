use super::*;
use crate::album::store::InMemoryAlbum;
use std::io::Write;

struct StubSurface {
    width: u32,
    height: u32,
}

impl Surface for StubSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

struct CountingRenderer {
    renders: usize,
}

impl Renderer<StubSurface> for CountingRenderer {
    fn render(
        &mut self,
        surface: &StubSurface,
        origin_x: u32,
        origin_y: u32,
        target: &mut Pixmap,
    ) -> GridshotResult<()> {
        self.renders += 1;
        for ty in 0..target.height() {
            for tx in 0..target.width() {
                let (x, y) = (origin_x + tx, origin_y + ty);
                if x < surface.width && y < surface.height {
                    target.set_pixel(tx, ty, 0xFF00_0000 | (x << 8) | y);
                }
            }
        }
        Ok(())
    }
}

struct StubHierarchy;

impl HierarchyDump<StubSurface> for StubHierarchy {
    fn dump(&self, _surface: &StubSurface, out: &mut dyn Write) -> GridshotResult<()> {
        out.write_all(b"foobar")
            .map_err(|e| GridshotError::storage(e.to_string()))
    }
}

fn session() -> CaptureSession<InMemoryAlbum, StubSurface> {
    CaptureSession::new(
        InMemoryAlbum::new(),
        Box::new(StubHierarchy),
        TestContext::new("RecordTests", "case"),
    )
}

#[test]
fn record_persists_the_single_tile_and_dump() {
    let mut session = session();
    let surface = StubSurface {
        width: 20,
        height: 10,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    session
        .snap(&surface, &mut renderer)
        .set_name("fooBar")
        .unwrap()
        .record()
        .unwrap();

    let stored = session.album().get("fooBar").unwrap().unwrap();
    assert_eq!((stored.width(), stored.height()), (20, 10));
    assert_eq!(session.album().dump("fooBar"), Some(&b"foobar"[..]));
    assert_eq!(renderer.renders, 1);
}

#[test]
fn invalid_names_fail_before_any_rendering() {
    let mut session = session();
    let surface = StubSurface {
        width: 20,
        height: 10,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    let err = session
        .snap(&surface, &mut renderer)
        .set_name("\u{06f1}")
        .unwrap_err();
    assert!(matches!(err, GridshotError::InvalidName(_)));

    let err = session
        .snap(&surface, &mut renderer)
        .set_name("has space")
        .unwrap_err();
    assert!(matches!(err, GridshotError::InvalidName(_)));

    assert_eq!(renderer.renders, 0);
    assert!(session.album().entries().unwrap().is_empty());
}

#[test]
fn bitmap_is_captured_once_and_cached() {
    let mut session = session();
    let surface = StubSurface {
        width: 20,
        height: 10,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    {
        let mut rb = session.snap(&surface, &mut renderer);
        let first = rb.bitmap().unwrap().clone();
        let second = rb.bitmap().unwrap().clone();
        first.verify_matches(&second).unwrap();
    }
    assert_eq!(renderer.renders, 1);
}

#[test]
fn bitmap_after_record_is_rejected() {
    let mut session = session();
    let surface = StubSurface {
        width: 20,
        height: 10,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    let mut rb = session.snap(&surface, &mut renderer);
    rb.record().unwrap();
    let err = rb.bitmap().unwrap_err();
    assert!(matches!(err, GridshotError::InvalidState(_)));
    let msg = err.to_string().to_lowercase();
    assert!(msg.contains("after") && msg.contains("record"), "got: {msg}");
}

#[test]
fn record_cannot_run_twice() {
    let mut session = session();
    let surface = StubSurface {
        width: 20,
        height: 10,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    let mut rb = session.snap(&surface, &mut renderer);
    rb.record().unwrap();
    assert!(matches!(
        rb.record().unwrap_err(),
        GridshotError::InvalidState(_)
    ));
}

#[test]
fn default_name_comes_from_the_test_context() {
    let mut session = session();
    let surface = StubSurface {
        width: 20,
        height: 10,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    {
        let mut rb = session.snap(&surface, &mut renderer);
        assert_eq!(rb.test_class(), "RecordTests");
        assert_eq!(rb.test_name(), "case");
        rb.record().unwrap();
    }
    assert!(
        session
            .album()
            .get("RecordTests_case")
            .unwrap()
            .is_some()
    );
}

#[test]
fn tiled_record_persists_every_tile_under_the_convention() {
    let mut session = session();
    session.set_tile_size(10);
    session.set_tile_reconfigure(true);
    let surface = StubSurface {
        width: 43,
        height: 32,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    session
        .snap(&surface, &mut renderer)
        .set_name("foo")
        .unwrap()
        .record()
        .unwrap();

    assert_eq!(renderer.renders, 20);
    for col in 0..5u32 {
        for row in 0..4u32 {
            let name = if col == 0 && row == 0 {
                "foo".to_owned()
            } else {
                format!("foo_{col}_{row}")
            };
            let tile = session.album().get(&name).unwrap().unwrap();
            let expected_w = if col == 4 { 3 } else { 10 };
            let expected_h = if row == 3 { 2 } else { 10 };
            assert_eq!((tile.width(), tile.height()), (expected_w, expected_h));
        }
    }
}

#[test]
fn zero_area_surfaces_fail_capture_and_persist_nothing() {
    let mut session = session();
    let surface = StubSurface {
        width: 0,
        height: 0,
    };
    let mut renderer = CountingRenderer { renders: 0 };

    {
        let mut rb = session.snap(&surface, &mut renderer);
        assert!(matches!(
            rb.bitmap().unwrap_err(),
            GridshotError::Capture(_)
        ));
    }
    {
        let mut rb = session.snap(&surface, &mut renderer);
        assert!(matches!(
            rb.record().unwrap_err(),
            GridshotError::Capture(_)
        ));
    }
    assert_eq!(renderer.renders, 0);
    assert!(session.album().entries().unwrap().is_empty());
}

#[test]
fn validate_name_accepts_the_documented_set() {
    assert!(validate_name("AZaz09_").is_ok());
    assert!(validate_name("").is_err());
    assert!(validate_name("dash-ed").is_err());
    assert!(validate_name("dot.ted").is_err());
}
