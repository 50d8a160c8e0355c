use crate::dom;
use crate::frame::{event_closure, wire, Mounted, SharedMount};
use crate::host::WebHost;
use crate::input;
use crate::render::{BranchSurface, GlowRegistry, GpuState, ParticleSurface, RasterSurface};
use backdrop_core::{
    BranchScene, Component, ListenerKind, MotionConfig, MotionError, MotionPolicy, MountState,
    ParticlePalette, ParticleScene, Variant, ViewportState,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

const BRANCH_LISTENERS: [ListenerKind; 4] = [
    ListenerKind::Scroll,
    ListenerKind::PointerMove,
    ListenerKind::Visibility,
    ListenerKind::Resize,
];

const PARTICLE_LISTENERS: [ListenerKind; 3] = [
    ListenerKind::Visibility,
    ListenerKind::Resize,
    ListenerKind::Click,
];

struct Environment {
    window: web::Window,
    document: web::Document,
    policy: MotionPolicy,
    state: MountState,
}

impl Environment {
    fn read(
        container: &web::Element,
        variant: Variant,
        is_dark_mode: bool,
    ) -> anyhow::Result<(Self, MotionConfig)> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let caps = dom::device_capabilities(&window);
        let config = dom::read_config(container);
        let policy = MotionPolicy::resolve(variant, &caps).with_max_fps(config.max_fps);
        let rect = dom::client_rect(container);
        let state = MountState {
            is_dark_mode,
            scroll_progress: dom::page_scroll_progress(&window),
            css_width: rect.width,
            css_height: rect.height,
            device_pixel_ratio: window.device_pixel_ratio(),
        };
        Ok((
            Self {
                window,
                document,
                policy,
                state,
            },
            config,
        ))
    }

    fn initial_viewport(&self) -> ViewportState {
        ViewportState::new(
            self.state.css_width,
            self.state.css_height,
            self.state.device_pixel_ratio,
            self.policy.variant.dpr_max(),
        )
    }

    fn surface_canvas(&self, container: &web::Element) -> anyhow::Result<web::HtmlCanvasElement> {
        let canvas = dom::create_surface_canvas(&self.document, container)?;
        let (w, h) = self.initial_viewport().backing_size();
        canvas.set_width(w);
        canvas.set_height(h);
        Ok(canvas)
    }
}

// ===================== Branch field =====================

type BranchMount = SharedMount<BranchScene, BranchSurface>;

/// Full-screen branch field behind page content.
#[wasm_bindgen]
pub struct BranchBackground {
    mounted: Option<BranchMount>,
}

async fn branch_surface(
    env: &Environment,
    container: &web::Element,
) -> anyhow::Result<(BranchSurface, web::HtmlCanvasElement)> {
    let canvas = env.surface_canvas(container)?;
    match GpuState::new(&canvas).await {
        Ok(gpu) => return Ok((BranchSurface::Gpu(gpu), canvas)),
        Err(e) => {
            log::warn!("[branches] WebGPU unavailable ({e}); using raster fallback");
            canvas.remove();
        }
    }
    // A canvas that handed out a webgpu context can't give a 2d one.
    let canvas = env.surface_canvas(container)?;
    match RasterSurface::new(canvas.clone()) {
        Ok(raster) => Ok((BranchSurface::Raster(raster), canvas)),
        Err(e) => {
            canvas.remove();
            Err(e)
        }
    }
}

async fn mount_branches(container: web::HtmlElement, is_dark_mode: bool) -> anyhow::Result<Option<BranchMount>> {
    let container: web::Element = container.into();
    let (env, _config) = Environment::read(&container, Variant::Branches, is_dark_mode)?;
    let surface = match branch_surface(&env, &container).await {
        Ok(pair) => Some(pair),
        Err(e) => {
            log::warn!("[branches] no drawing surface: {e}");
            None
        }
    };
    if !container.is_connected() {
        log::info!("[branches] container detached during setup");
        if let Some((_, canvas)) = surface {
            canvas.remove();
        }
        return Ok(None);
    }

    let mut host = WebHost::new(env.window.clone(), env.document.clone());
    host.set_container(container.clone());
    let surface = surface.map(|(surface, canvas)| {
        host.set_canvas(canvas);
        surface
    });
    let shared: BranchMount = Rc::new(RefCell::new(Mounted::new(host, container, true)));
    wire(&shared, &BRANCH_LISTENERS);
    {
        let mut guard = shared.borrow_mut();
        let mounted = &mut *guard;
        let component = Component::mount(
            env.policy,
            BranchScene::new(env.policy.tier),
            env.state,
            &mut mounted.host,
            &BRANCH_LISTENERS,
            move || surface.ok_or_else(|| MotionError::SurfaceUnavailable("no webgpu or 2d context".into())),
        );
        mounted.component = Some(component);
    }
    Ok(Some(shared))
}

#[wasm_bindgen]
impl BranchBackground {
    /// Attach to `container`. Resolves once the drawing surface is ready;
    /// failures leave an inert instance and never throw.
    pub async fn mount(container: web::HtmlElement, is_dark_mode: bool) -> BranchBackground {
        let mounted = match mount_branches(container, is_dark_mode).await {
            Ok(mounted) => mounted,
            Err(e) => {
                log::error!("[branches] mount error: {:?}", e);
                None
            }
        };
        BranchBackground { mounted }
    }

    #[wasm_bindgen(js_name = setDarkMode)]
    pub fn set_dark_mode(&self, is_dark_mode: bool) {
        if let Some(shared) = &self.mounted {
            if let Some(component) = shared.borrow_mut().component.as_mut() {
                component.set_dark_mode(is_dark_mode);
            }
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .and_then(|shared| shared.borrow().component.as_ref().map(|c| c.lifecycle().is_running()))
            .unwrap_or(false)
    }

    pub fn unmount(&mut self) {
        if let Some(shared) = self.mounted.take() {
            shared.borrow_mut().unmount();
        }
    }
}

// ===================== Particle pairs =====================

type ParticleMount = SharedMount<ParticleScene, ParticleSurface>;

/// Starfield with orbiting matter/antimatter pairs; clicks spawn pairs.
#[wasm_bindgen]
pub struct HawkingBackground {
    mounted: Option<ParticleMount>,
}

fn spawn_at(mounted: &mut Mounted<ParticleScene, ParticleSurface>, client_x: f64, client_y: f64) -> bool {
    let rect = mounted.refresh_rect();
    let Some(uv) = input::client_uv(client_x, client_y, &rect) else {
        return false;
    };
    let Some(component) = mounted.component.as_mut() else {
        return false;
    };
    // Nothing would ever animate the new pair.
    if component.policy().reduced_motion || component.lifecycle().is_torn_down() {
        return false;
    }
    component.scene_mut().spawn_at(uv);
    true
}

fn on_click(mounted: &mut Mounted<ParticleScene, ParticleSurface>, event: &web::Event) {
    if let Some(ev) = event.dyn_ref::<web::MouseEvent>() {
        spawn_at(mounted, ev.client_x() as f64, ev.client_y() as f64);
    }
}

fn mount_particles(
    container: web::HtmlElement,
    is_dark_mode: bool,
    registry: &GlowRegistry,
) -> anyhow::Result<ParticleMount> {
    let container: web::Element = container.into();
    let (env, config) = Environment::read(&container, Variant::Particles, is_dark_mode)?;
    let scene = ParticleScene::new(
        config.particle_scene(env.policy.tier, rand::random::<u64>()),
        is_dark_mode,
    );

    let mut host = WebHost::new(env.window.clone(), env.document.clone());
    host.set_container(container.clone());
    let surface = env.surface_canvas(&container).and_then(|canvas| {
        match ParticleSurface::new(
            canvas.clone(),
            env.document.clone(),
            registry.pool(),
            &ParticlePalette::for_theme(is_dark_mode),
        ) {
            Ok(surface) => Ok((surface, canvas)),
            Err(e) => {
                canvas.remove();
                Err(e)
            }
        }
    });
    let surface = match surface {
        Ok((surface, canvas)) => {
            host.set_canvas(canvas);
            Ok(surface)
        }
        Err(e) => Err(MotionError::SurfaceUnavailable(e.to_string())),
    };

    let shared: ParticleMount = Rc::new(RefCell::new(Mounted::new(host, container, false)));
    wire(&shared, &PARTICLE_LISTENERS);
    {
        let weak = Rc::downgrade(&shared);
        let mut guard = shared.borrow_mut();
        let mounted = &mut *guard;
        mounted
            .host
            .on_event(ListenerKind::Click, event_closure(weak, on_click));
        let component = Component::mount(
            env.policy,
            scene,
            env.state,
            &mut mounted.host,
            &PARTICLE_LISTENERS,
            move || surface,
        );
        mounted.component = Some(component);
    }
    Ok(shared)
}

#[wasm_bindgen]
impl HawkingBackground {
    /// Attach to `container`. Glow sprites are shared through `registry`.
    pub fn mount(container: web::HtmlElement, is_dark_mode: bool, registry: &GlowRegistry) -> HawkingBackground {
        let mounted = match mount_particles(container, is_dark_mode, registry) {
            Ok(mounted) => Some(mounted),
            Err(e) => {
                log::error!("[particles] mount error: {:?}", e);
                None
            }
        };
        HawkingBackground { mounted }
    }

    #[wasm_bindgen(js_name = setDarkMode)]
    pub fn set_dark_mode(&self, is_dark_mode: bool) {
        let Some(shared) = &self.mounted else {
            return;
        };
        let mut guard = shared.borrow_mut();
        let Some(component) = guard.component.as_mut() else {
            return;
        };
        // Palette first so a reduced-motion re-render already uses it.
        if let Some(surface) = component.surface_mut() {
            surface.set_palette(&ParticlePalette::for_theme(is_dark_mode));
        }
        component.set_dark_mode(is_dark_mode);
    }

    /// Spawn a one-shot pair under a viewport coordinate. Returns whether a
    /// pair was added.
    #[wasm_bindgen(js_name = spawnAtClient)]
    pub fn spawn_at_client(&self, client_x: f64, client_y: f64) -> bool {
        match &self.mounted {
            Some(shared) => spawn_at(&mut shared.borrow_mut(), client_x, client_y),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = pairCount)]
    pub fn pair_count(&self) -> usize {
        self.mounted
            .as_ref()
            .and_then(|shared| shared.borrow().component.as_ref().map(|c| c.scene().pair_count()))
            .unwrap_or(0)
    }

    pub fn unmount(&mut self) {
        if let Some(shared) = self.mounted.take() {
            shared.borrow_mut().unmount();
        }
    }
}
