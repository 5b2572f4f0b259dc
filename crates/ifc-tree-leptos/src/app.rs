//! Application wiring: engine, tree panel and selection bridge
//!
//! [`ViewerApp`] is the single context object every handler reaches through. It is
//! created once at startup and shared via `Rc`.

use crate::components::{LoadStatus, TreeMount};
use crate::engine::{Engine, SceneEngine};
use gloo::events::EventListener;
use ifc_tree_model::{
    LoadGuard, LoadState, ModelIndex, Result, SelectionBridge, ViewerConfig, ViewerError,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub struct ViewerApp<E = Engine> {
    config: ViewerConfig,
    engine: E,
    tree: TreeMount,
    bridge: SelectionBridge,
    load: RefCell<LoadGuard>,
    listeners: RefCell<Vec<EventListener>>,
}

fn element_by_id(id: &str) -> Result<HtmlElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| ViewerError::MissingElement(id.to_string()))
}

impl ViewerApp<Engine> {
    /// Create the web-ifc-viewer engine in the configured container
    pub fn new(config: ViewerConfig) -> Result<Rc<Self>> {
        let container = element_by_id(&config.container_id)?;
        let tree_root = element_by_id(&config.tree_root_id)?;

        let engine = Engine::new(&container, &config)?;
        Ok(Self::with_engine(config, engine, &container, tree_root))
    }
}

impl<E: SceneEngine> ViewerApp<E> {
    /// Wire `engine` to the viewport and tree containers and attach all pointer handlers
    pub fn with_engine(
        config: ViewerConfig,
        engine: E,
        viewport: &HtmlElement,
        tree_root: HtmlElement,
    ) -> Rc<Self> {
        let bridge = SelectionBridge::new(engine.selector(), ModelIndex::FIRST);

        let app = Rc::new(Self {
            config,
            engine,
            tree: TreeMount::new(tree_root),
            bridge,
            load: RefCell::new(LoadGuard::new()),
            listeners: RefCell::new(Vec::new()),
        });
        app.attach_listeners(viewport);
        app
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn load_state(&self) -> LoadState {
        self.load.borrow().state().clone()
    }

    /// Model currently shown in the scene
    pub fn current_model(&self) -> Option<ModelIndex> {
        self.load.borrow().current_model()
    }

    fn attach_listeners(&self, container: &HtmlElement) {
        let bridge = self.bridge.clone();
        let mut listeners = self.listeners.borrow_mut();

        let b = bridge.clone();
        listeners.push(EventListener::new(container, "mousemove", move |_| {
            b.on_viewport_hover()
        }));
        let b = bridge.clone();
        listeners.push(EventListener::new(container, "click", move |_| {
            b.on_viewport_click()
        }));
        let b = bridge.clone();
        listeners.push(EventListener::new(container, "dblclick", move |_| {
            b.on_viewport_double_click()
        }));
        listeners.push(EventListener::new(
            self.tree.container(),
            "mouseleave",
            move |_| bridge.on_tree_leave(),
        ));
    }

    /// Load `url` and rebuild the tree
    ///
    /// Rejected while another load is pending. Failures end up in the tree
    /// container as an error entry and leave the previous model in the scene.
    pub async fn load_model(&self, url: String) -> Result<()> {
        self.load.borrow_mut().begin(&url)?;
        log::info!("Loading {}", url);
        self.tree.show_status(LoadStatus::Loading(url.clone()));

        match self.load_and_render(&url).await {
            Ok(model) => {
                self.load.borrow_mut().complete(model);
                log::info!("Loaded {} as {}", url, model);
                Ok(())
            }
            Err(e) => {
                log::error!("{}", e);
                self.load.borrow_mut().fail(e.to_string());
                self.tree.show_status(LoadStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn load_and_render(&self, url: &str) -> Result<ModelIndex> {
        let previous = self.current_model();
        let model = self.engine.load_model(url).await?;

        if let Err(e) = self.present(model).await {
            if previous != Some(model) {
                self.remove_model(model);
            }
            return Err(e);
        }

        if let Some(previous) = previous.filter(|p| *p != model) {
            self.remove_model(previous);
        }
        Ok(model)
    }

    /// Scene effects, spatial structure and tree for a freshly loaded model
    async fn present(&self, model: ModelIndex) -> Result<()> {
        if self.config.shadows {
            // A missing shadow is cosmetic, keep going
            if let Err(e) = self.engine.render_shadow(model).await {
                log::warn!("Shadow rendering failed: {}", e);
            }
        }
        if self.config.post_production {
            self.engine.set_post_production(true);
        }

        let project = self.engine.spatial_structure(model).await?;
        project.validate()?;
        log::debug!(
            "Spatial structure: {} nodes, depth {}",
            project.node_count(),
            project.depth()
        );

        self.tree.render_tree(&project, self.bridge.with_model(model));
        Ok(())
    }

    fn remove_model(&self, model: ModelIndex) {
        if let Err(e) = self.engine.remove_model(model) {
            log::warn!("Could not remove {}: {}", model, e);
        }
    }
}

/// Run a load in the background, logging anything that goes wrong
pub fn spawn_load<E: SceneEngine + 'static>(app: Rc<ViewerApp<E>>, url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = app.load_model(url).await {
            // Everything else was already reported by load_model
            if matches!(e, ViewerError::LoadInProgress(_)) {
                log::warn!("{}", e);
            }
        }
        log::debug!("Load state: {:?}", app.load_state());
    });
}
