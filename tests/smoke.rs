use flexspace::{Element, Style, Ui, UiProps};
use flexspace_testkit::{flatten_descriptors, EventRecord, JsonlSink};

#[test]
fn descriptor_snapshot_can_be_written() {
    let root = Element::layer(Style::default())
        .with_child(Element::layer(Style::default().with_flex(1.0)));
    let ui = Ui::new(
        UiProps {
            width: 50.0,
            height: 50.0,
            ..Default::default()
        },
        root,
    )
    .expect("mount");

    let mut sink = JsonlSink::create(std::env::temp_dir().join("descriptors.jsonl"))
        .expect("can create temp log");
    for record in flatten_descriptors(ui.scene()) {
        sink.write(&record).expect("can write record");
    }
    sink.write(&EventRecord {
        frame: 0,
        kind: "SmokeTest",
        payload: "ok",
    })
    .expect("can write event");
}
