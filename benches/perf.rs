use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use ratatui::layout::Rect;
use ratatui::prelude::Buffer;
use ratatui::widgets::StatefulWidget;

use tui_storeselect::{
    CascadePolicy, Hierarchy, HierarchyLabels, SelectionModel, SelectorStyle, SelectorView,
    SelectorViewState,
};

// Every department, class and subclass checked: the widest encode and view.
fn fully_selected(policy: CascadePolicy) -> SelectionModel {
    let hierarchy = Hierarchy::generated(200, 12, 8).expect("valid hierarchy");
    let mut selection = SelectionModel::with_policy(hierarchy.clone(), policy);
    for department in hierarchy.departments() {
        selection.toggle_department(department).expect("known department");
    }
    for department in hierarchy.departments() {
        for class in hierarchy.classes(department) {
            selection.toggle_class(class).expect("known class");
        }
    }
    for department in hierarchy.departments() {
        for class in hierarchy.classes(department) {
            for subclass in hierarchy.subclasses(class) {
                selection.toggle_subclass(subclass).expect("known subclass");
            }
        }
    }
    selection
}

fn bench_encode(c: &mut Criterion) {
    let selection = fully_selected(CascadePolicy::Global);
    c.bench_function("encode_full_selection", |b| {
        b.iter(|| black_box(selection.encode()));
    });
}

fn bench_scoped_toggle(c: &mut Criterion) {
    let mut selection = fully_selected(CascadePolicy::Scoped);
    let hierarchy = selection.hierarchy().clone();
    let class = hierarchy
        .departments()
        .nth(100)
        .map(|department| department.class(6))
        .expect("department 101 exists");
    c.bench_function("scoped_class_toggle", |b| {
        b.iter(|| {
            black_box(selection.toggle_class(class).expect("known class"));
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let selection = fully_selected(CascadePolicy::Global);
    let label = HierarchyLabels;
    let area = Rect::new(0, 0, 80, 40);
    c.bench_function("render_selector_view", |b| {
        b.iter(|| {
            let mut state = SelectorViewState::new();
            let mut buffer = Buffer::empty(area);
            SelectorView::new(&selection, &label, SelectorStyle::default()).render(
                area,
                &mut buffer,
                &mut state,
            );
            black_box(buffer);
        });
    });
}

criterion_group!(benches, bench_encode, bench_scoped_toggle, bench_render);
criterion_main!(benches);
