//! End-to-end tests running the full parse-then-resolve pipeline

use anyhow::Result;
use pumlstate::prelude::*;

const DEVICE_DIAGRAM: &str = r#"@startuml "Simple Diagram"

state "Device Off" as Off
Off : entry / DisableLeds

state On {
    [*] --> Idle

    state Idle
    Idle : entry / EnableReadyLed
    Idle --> Responding : ButtonPressed

    state Responding
    Responding : entry / EnableRespondingLed
    Responding --> Idle : ResponseComplete
}

[*] --> Off
Off --> On : PowerButtonPressed / BootSystem
On --> Off : PowerButtonPressed
@enduml
"#;

fn state_of<'m>(machine: &'m StateMachine, name: &str) -> Result<(VertexId, &'m State)> {
    machine
        .find_state(name)
        .ok_or_else(|| anyhow::anyhow!("no state named {}", name))
}

#[test]
fn test_device_diagram_parses() -> Result<()> {
    let diagram = parse(DEVICE_DIAGRAM)?;
    assert_eq!(diagram.name, "Simple Diagram");
    assert_eq!(diagram.elements.len(), 6);
    Ok(())
}

#[test]
fn test_device_diagram_resolves() -> Result<()> {
    let machine = compile(DEVICE_DIAGRAM)?;
    assert_eq!(machine.name(), "Simple Diagram");
    assert_eq!(machine.state_count(), 4);

    let root_names: Vec<&str> = machine
        .children()
        .iter()
        .map(|id| machine.state(*id).name())
        .collect();
    assert_eq!(root_names, ["Off", "On"]);

    let (_, on) = state_of(&machine, "On")?;
    let nested_names: Vec<&str> = on
        .children()
        .iter()
        .map(|id| machine.state(*id).name())
        .collect();
    assert_eq!(nested_names, ["Idle", "Responding"]);
    Ok(())
}

#[test]
fn test_device_diagram_wires_transitions() -> Result<()> {
    let machine = compile(DEVICE_DIAGRAM)?;
    let (off_id, off) = state_of(&machine, "Off")?;
    let (on_id, on) = state_of(&machine, "On")?;
    let (idle_id, idle) = state_of(&machine, "Idle")?;
    let (responding_id, responding) = state_of(&machine, "Responding")?;

    assert_eq!(machine.initial_transitions().len(), 1);
    assert_eq!(machine.initial_transitions()[0].target, off_id);

    assert_eq!(on.initial_transitions().len(), 1);
    assert_eq!(on.initial_transitions()[0].target, idle_id);

    let boot = &off.transitions()[0];
    assert_eq!(boot.event_name, "PowerButtonPressed");
    assert_eq!(boot.action_name, "BootSystem");
    assert_eq!(boot.target, TransitionTarget::State(on_id));

    assert_eq!(on.transitions()[0].target, TransitionTarget::State(off_id));
    assert_eq!(
        idle.transitions()[0].target,
        TransitionTarget::State(responding_id)
    );
    assert_eq!(
        responding.transitions()[0].target,
        TransitionTarget::State(idle_id)
    );
    Ok(())
}

#[test]
fn test_device_diagram_wires_entry_actions() -> Result<()> {
    let machine = compile(DEVICE_DIAGRAM)?;
    for (name, action) in [
        ("Off", "DisableLeds"),
        ("Idle", "EnableReadyLed"),
        ("Responding", "EnableRespondingLed"),
    ] {
        let (_, state) = state_of(&machine, name)?;
        assert_eq!(state.entry_actions().len(), 1, "state {}", name);
        assert_eq!(state.entry_actions()[0].action_name, action);
    }
    Ok(())
}

#[test]
fn test_resolving_same_diagram_twice_is_identical() -> Result<()> {
    let diagram = parse(DEVICE_DIAGRAM)?;
    let first = resolve(&diagram)?;
    let second = resolve(&diagram)?;
    assert_eq!(first, second);

    let first_names: Vec<&str> = first.states().map(|(_, state)| state.name()).collect();
    let second_names: Vec<&str> = second.states().map(|(_, state)| state.name()).collect();
    assert_eq!(first_names, second_names);
    Ok(())
}

#[test]
fn test_friendly_names_normalize_through_pipeline() -> Result<()> {
    let machine = compile(
        "@startuml\nstate Lamp\nLamp : entry / Enable led driver\nLamp --> Lamp : Blink [Switch is on()] / Toggle output pin\n@enduml",
    )?;
    let (_, lamp) = state_of(&machine, "Lamp")?;
    assert_eq!(lamp.entry_actions()[0].action_name, "EnableLedDriver");
    let blink = &lamp.transitions()[0];
    assert_eq!(blink.guard_name, "SwitchIsOn");
    assert_eq!(blink.action_name, "ToggleOutputPin");
    Ok(())
}
