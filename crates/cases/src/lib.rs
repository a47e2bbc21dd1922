//! Named flow presets
//!
//! Classic superpositions (half-body, oval, cylinder, ...) are registered at
//! link time with [`inventory`] and looked up by name. Adding a case is a
//! builder function plus one `inventory::submit!`. Coordinates assume the
//! [-4, 4]² viewing window.

use std::f64::consts::PI;

use potflow_elements::FlowElement;

/// 名前付きの流れ要素構成。
pub struct Case {
    /// 検索キー。小文字のスネークケース。
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Vec<FlowElement>,
}

impl Case {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        build: fn() -> Vec<FlowElement>,
    ) -> Self {
        Self {
            name,
            description,
            build,
        }
    }

    /// 要素列を新たに構築する。
    pub fn elements(&self) -> Vec<FlowElement> {
        (self.build)()
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

inventory::collect!(Case);

/// 登録済みの全ケースを名前順で返す。
pub fn all_cases() -> Vec<&'static Case> {
    let mut cases: Vec<&'static Case> = inventory::iter::<Case>.into_iter().collect();
    cases.sort_by_key(|c| c.name);
    cases
}

/// 名前でケースを探す。
pub fn find_case(name: &str) -> Option<&'static Case> {
    inventory::iter::<Case>
        .into_iter()
        .find(|c| c.name == name)
}

// ===== 標準ケース =====

/// 円柱半径 R = 1 を与える二重湧き出しの強さ `K = 2π U R²`。
fn cylinder_doublet(u: f64) -> FlowElement {
    FlowElement::doublet(2.0 * PI * u, (0.0, 0.0))
}

fn app_default() -> Vec<FlowElement> {
    vec![
        FlowElement::uniform(1.0),
        FlowElement::source(5.0, (-1.0, 0.0)),
        FlowElement::sink(5.0, (1.0, 0.0)),
        FlowElement::vortex(0.0, (0.0, 0.0)),
    ]
}

fn uniform_flow() -> Vec<FlowElement> {
    vec![FlowElement::uniform(1.0)]
}

fn single_source() -> Vec<FlowElement> {
    vec![FlowElement::source(5.0, (0.0, 0.0))]
}

fn single_sink() -> Vec<FlowElement> {
    vec![FlowElement::sink(5.0, (0.0, 0.0))]
}

fn free_vortex() -> Vec<FlowElement> {
    vec![FlowElement::vortex(5.0, (0.0, 0.0))]
}

fn single_doublet() -> Vec<FlowElement> {
    vec![FlowElement::doublet(5.0, (0.0, 0.0))]
}

fn source_sink_pair() -> Vec<FlowElement> {
    vec![
        FlowElement::source(5.0, (-1.0, 0.0)),
        FlowElement::sink(5.0, (1.0, 0.0)),
    ]
}

fn rankine_half_body() -> Vec<FlowElement> {
    vec![
        FlowElement::uniform(2.0),
        FlowElement::source(5.0, (0.0, 0.0)),
    ]
}

fn rankine_oval() -> Vec<FlowElement> {
    let mut elements = vec![FlowElement::uniform(1.0)];
    elements.extend(source_sink_pair());
    elements
}

fn cylinder() -> Vec<FlowElement> {
    vec![FlowElement::uniform(1.0), cylinder_doublet(1.0)]
}

fn lifting_cylinder() -> Vec<FlowElement> {
    // 時計回りの循環 Γ = −2π: 表面上のよどみ点は θ = −30°, −150°
    vec![
        FlowElement::uniform(1.0),
        cylinder_doublet(1.0),
        FlowElement::vortex(-2.0 * PI, (0.0, 0.0)),
    ]
}

fn spiral_sink() -> Vec<FlowElement> {
    vec![
        FlowElement::sink(5.0, (0.0, 0.0)),
        FlowElement::vortex(5.0, (0.0, 0.0)),
    ]
}

inventory::submit! {
    Case::new(
        "app_default",
        "U=1 with a source at (-1,0), a sink at (1,0) and a zero-strength vortex",
        app_default,
    )
}

inventory::submit! {
    Case::new("uniform_flow", "uniform stream U=1 along +x", uniform_flow)
}

inventory::submit! {
    Case::new("source", "single source m=5 at the origin", single_source)
}

inventory::submit! {
    Case::new("sink", "single sink m=5 at the origin", single_sink)
}

inventory::submit! {
    Case::new("vortex", "free vortex with counter-clockwise circulation 5", free_vortex)
}

inventory::submit! {
    Case::new("doublet", "doublet K=5 at the origin", single_doublet)
}

inventory::submit! {
    Case::new("source_sink_pair", "source and sink m=5 at (-1,0) and (1,0)", source_sink_pair)
}

inventory::submit! {
    Case::new(
        "rankine_half_body",
        "uniform stream U=2 with a source m=5 at the origin",
        rankine_half_body,
    )
}

inventory::submit! {
    Case::new("rankine_oval", "uniform stream U=1 past a source-sink pair", rankine_oval)
}

inventory::submit! {
    Case::new("cylinder", "non-lifting flow past a unit cylinder", cylinder)
}

inventory::submit! {
    Case::new(
        "lifting_cylinder",
        "unit cylinder with clockwise circulation 2*pi",
        lifting_cylinder,
    )
}

inventory::submit! {
    Case::new("spiral_sink", "sink and vortex at the origin", spiral_sink)
}
