use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use deimos::prelude::*;

mod framework;

fn run_frame(core: &mut RenderCore, graph: &mut RenderGraph, frame: usize) -> Result<()> {
    core.command_sets.begin_frame(frame);
    core.command_sets.reset_command();
    let mut ctx = RenderPassContext::new(core.command_sets.active_set_mut(), &core.resources);
    graph.execute(&mut ctx)?;
    core.command_sets.close_command();
    Ok(())
}

#[test]
fn writer_precedes_reader_regardless_of_registration_order() {
    let mut core = framework::make_core();
    let buffer = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let reader = ids.id("reader");
    let writer = ids.id("writer");

    let executed = Rc::new(RefCell::new(Vec::new()));
    let mut graph = RenderGraph::new();
    // The reader is registered first; the declarations still place the
    // writer before it.
    let log = executed.clone();
    graph.add_pass(
        reader,
        move |builder| {
            builder.read_as(buffer, ResourceState::CopySource);
            Ok(())
        },
        move |pass, _ctx| {
            log.borrow_mut().push(pass.id());
            Ok(())
        },
    );
    let log = executed.clone();
    graph.add_pass(
        writer,
        move |builder| {
            builder.write_as(buffer, ResourceState::CopyDest);
            Ok(())
        },
        move |pass, _ctx| {
            log.borrow_mut().push(pass.id());
            Ok(())
        },
    );

    graph.compile().unwrap();
    assert_eq!(graph.execution_order().collect::<Vec<_>>(), vec![writer, reader]);
    run_frame(&mut core, &mut graph, 0).unwrap();
    assert_eq!(*executed.borrow(), vec![writer, reader]);
}

#[test]
fn registration_order_is_the_tie_break() {
    let core = framework::make_core();
    let a = framework::add_upload_buffer(&core, 4);
    let b = framework::add_upload_buffer(&core, 4);
    let c = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let first = ids.id("first");
    let second = ids.id("second");
    let third = ids.id("third");

    // Three passes with no hazards between them keep registration order.
    let mut graph = RenderGraph::new();
    for (id, handle) in [(first, a), (second, b), (third, c)] {
        graph.add_pass(
            id,
            move |builder| {
                builder.write_as(handle, ResourceState::CopyDest);
                Ok(())
            },
            move |_pass, _ctx| Ok(()),
        );
    }
    graph.compile().unwrap();
    assert_eq!(
        graph.execution_order().collect::<Vec<_>>(),
        vec![first, second, third]
    );
}

#[test]
fn writers_of_same_resource_execute_in_registration_order() {
    let mut core = framework::make_core();
    let shared = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let upload = ids.id("upload");
    let refine = ids.id("refine");

    let executed = Rc::new(RefCell::new(Vec::new()));
    let mut graph = RenderGraph::new();
    for id in [upload, refine] {
        let log = executed.clone();
        graph.add_pass(
            id,
            move |builder| {
                builder.write_as(shared, ResourceState::CopyDest);
                Ok(())
            },
            move |pass, _ctx| {
                log.borrow_mut().push(pass.id());
                Ok(())
            },
        );
    }
    graph.compile().unwrap();
    run_frame(&mut core, &mut graph, 0).unwrap();
    assert_eq!(*executed.borrow(), vec![upload, refine]);
}

#[test]
fn cyclic_declarations_are_rejected() {
    let core = framework::make_core();
    let h1 = framework::add_upload_buffer(&core, 4);
    let h2 = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let a = ids.id("a");
    let b = ids.id("b");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        a,
        move |builder| {
            builder.write_as(h1, ResourceState::CopyDest);
            builder.read_as(h2, ResourceState::CopySource);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    graph.add_pass(
        b,
        move |builder| {
            builder.write_as(h2, ResourceState::CopyDest);
            builder.read_as(h1, ResourceState::CopySource);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );

    let err = graph.compile().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::GraphHasCycle)
    ));
}

#[test]
fn declared_accesses_succeed_during_execute() {
    let mut core = framework::make_core();
    let input = framework::add_upload_buffer(&core, 4);
    let output = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let pass_id = ids.id("pass");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        pass_id,
        move |builder| {
            builder.read_as(input, ResourceState::CopySource);
            builder.write_as(output, ResourceState::CopyDest);
            Ok(())
        },
        move |pass, ctx| {
            assert!(pass.read_token().permits(input));
            // A writer may read back its own output.
            assert!(pass.read_token().permits(output));
            assert!(pass.write_token().permits(output));
            assert!(!pass.write_token().permits(input));
            ctx.resources().with_lock(|mut access| {
                access.read_resource(input, pass.read_token());
                access.write_resource(output, pass.write_token());
            });
            Ok(())
        },
    );
    graph.compile().unwrap();
    run_frame(&mut core, &mut graph, 0).unwrap();
}

#[test]
#[should_panic(expected = "was not declared")]
fn undeclared_write_access_panics() {
    let mut core = framework::make_core();
    let input = framework::add_upload_buffer(&core, 4);
    let output = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let pass_id = ids.id("violating");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        pass_id,
        move |builder| {
            builder.read_as(input, ResourceState::CopySource);
            builder.write_as(output, ResourceState::CopyDest);
            Ok(())
        },
        move |pass, ctx| {
            // `input` was only declared for reading.
            ctx.resources().with_lock(|mut access| {
                access.write_resource(input, pass.write_token());
            });
            Ok(())
        },
    );
    graph.compile().unwrap();
    let _ = run_frame(&mut core, &mut graph, 0);
}

#[test]
#[should_panic(expected = "was not declared")]
fn undeclared_read_access_panics() {
    let mut core = framework::make_core();
    let declared = framework::add_upload_buffer(&core, 4);
    let undeclared = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let pass_id = ids.id("violating");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        pass_id,
        move |builder| {
            builder.read_as(declared, ResourceState::CopySource);
            Ok(())
        },
        move |pass, ctx| {
            ctx.resources().with_lock(|access| {
                let _resource = access.read_resource(undeclared, pass.read_token());
            });
            Ok(())
        },
    );
    graph.compile().unwrap();
    let _ = run_frame(&mut core, &mut graph, 0);
}

#[test]
fn write_then_read_scenario() {
    let mut core = framework::make_core();
    // Pass A writes a 4-byte buffer H, pass B reads H and writes O. After the
    // frame, O holds the value A wrote into H.
    let h = framework::add_upload_buffer(&core, 4);
    let o = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let produce = ids.id("produce");
    let consume = ids.id("consume");

    let value = 0xDEADBEEFu32.to_le_bytes();
    let mut graph = RenderGraph::new();
    graph.add_pass(
        produce,
        move |builder| {
            builder.write_as(h, ResourceState::CopyDest);
            Ok(())
        },
        move |pass, ctx| {
            ctx.resources().with_lock(|mut access| {
                access
                    .write_resource(h, pass.write_token())
                    .as_buffer_mut()
                    .unwrap()
                    .update_data(&value, 0)
            })?;
            Ok(())
        },
    );
    graph.add_pass(
        consume,
        move |builder| {
            builder.read_as(h, ResourceState::CopySource);
            builder.write_as(o, ResourceState::CopyDest);
            Ok(())
        },
        move |pass, ctx| {
            ctx.resources().with_lock(|mut access| -> Result<()> {
                let bytes = access
                    .read_resource(h, pass.read_token())
                    .as_buffer()
                    .unwrap()
                    .contents()?
                    .to_vec();
                access
                    .write_resource(o, pass.write_token())
                    .as_buffer_mut()
                    .unwrap()
                    .update_data(&bytes, 0)
            })?;
            ctx.command_list().copy_buffer(h, o, 4);
            Ok(())
        },
    );

    graph.compile().unwrap();
    run_frame(&mut core, &mut graph, 0).unwrap();

    // Transitions were issued right before the consuming pass, in declaration
    // order.
    let recorded = framework::transitions(core.command_sets.set(0).commands());
    assert_eq!(
        recorded,
        vec![
            (h, ResourceState::Common, ResourceState::CopyDest),
            (h, ResourceState::CopyDest, ResourceState::CopySource),
            (o, ResourceState::Common, ResourceState::CopyDest),
        ]
    );

    let output = core.eraser.erase_resource(o);
    assert_eq!(output.as_buffer().unwrap().contents().unwrap(), &value);
}

#[test]
fn default_write_state_is_render_target() {
    let mut core = framework::make_core();
    let target = framework::add_render_target(&mut core, 640, 480);
    let mut ids = PassIdRegistry::new();
    let pass_id = ids.id("geometry");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        pass_id,
        move |builder| {
            builder.write(target);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    graph.compile().unwrap();
    run_frame(&mut core, &mut graph, 0).unwrap();

    let recorded = framework::transitions(core.command_sets.set(0).commands());
    assert_eq!(
        recorded,
        vec![(target, ResourceState::Common, ResourceState::RenderTarget)]
    );
    let resource = core.eraser.erase_resource(target);
    assert_eq!(resource.state(), ResourceState::RenderTarget);
}

#[test]
fn setup_failure_aborts_compile() {
    let core = framework::make_core();
    let buffer = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let ready = ids.id("ready");
    let unready = ids.id("unready");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        ready,
        move |builder| {
            builder.write_as(buffer, ResourceState::CopyDest);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    graph.add_pass(
        unready,
        move |_builder| Err(anyhow!("shadow map handle was never set")),
        move |_pass, _ctx| Ok(()),
    );

    let err = graph.compile().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::PassSetupFailed(id)) if *id == unready
    ));
}

#[test]
fn execute_failure_stops_the_frame() {
    let mut core = framework::make_core();
    let buffer = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let failing = ids.id("failing");
    let downstream = ids.id("downstream");

    let downstream_ran = Rc::new(RefCell::new(false));
    let mut graph = RenderGraph::new();
    graph.add_pass(
        failing,
        move |builder| {
            builder.write_as(buffer, ResourceState::CopyDest);
            Ok(())
        },
        move |_pass, _ctx| Err(anyhow!("device lost")),
    );
    let ran = downstream_ran.clone();
    graph.add_pass(
        downstream,
        move |builder| {
            builder.read_as(buffer, ResourceState::CopySource);
            Ok(())
        },
        move |_pass, _ctx| {
            *ran.borrow_mut() = true;
            Ok(())
        },
    );

    graph.compile().unwrap();
    let err = run_frame(&mut core, &mut graph, 0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::PassExecuteFailed(id)) if *id == failing
    ));
    assert!(!*downstream_ran.borrow());
}

#[test]
#[should_panic(expected = "without a compiled graph")]
fn execute_before_compile_panics() {
    let mut core = framework::make_core();
    let buffer = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let pass_id = ids.id("pass");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        pass_id,
        move |builder| {
            builder.write_as(buffer, ResourceState::CopyDest);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    let _ = run_frame(&mut core, &mut graph, 0);
}

#[test]
#[should_panic(expected = "call clear() first")]
fn registering_on_a_compiled_graph_panics() {
    let core = framework::make_core();
    let buffer = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let pass_id = ids.id("pass");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        pass_id,
        move |builder| {
            builder.write_as(buffer, ResourceState::CopyDest);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    graph.compile().unwrap();
    graph.add_pass(pass_id, move |_builder| Ok(()), move |_pass, _ctx| Ok(()));
}

#[test]
fn empty_graph_compiles_and_executes() {
    let mut core = framework::make_core();
    let mut graph = RenderGraph::new();
    graph.compile().unwrap();
    run_frame(&mut core, &mut graph, 0).unwrap();
    assert!(core.command_sets.set(0).commands().is_empty());
}

#[test]
fn dot_output_names_passes() {
    let core = framework::make_core();
    let buffer = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let producer = ids.id("producer");
    let consumer = ids.id("consumer");

    let mut graph = RenderGraph::new();
    graph.add_pass(
        producer,
        move |builder| {
            builder.write_as(buffer, ResourceState::CopyDest);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    graph.add_pass(
        consumer,
        move |builder| {
            builder.read_as(buffer, ResourceState::CopySource);
            Ok(())
        },
        move |_pass, _ctx| Ok(()),
    );
    graph.compile().unwrap();

    let dot = graph.dot();
    assert!(dot.contains("digraph"));
    assert!(dot.contains("->"));
}

#[test]
fn thousand_frame_cycle_leaves_graph_empty() {
    let mut core = framework::make_core();
    let h = framework::add_upload_buffer(&core, 4);
    let o = framework::add_upload_buffer(&core, 4);
    let mut ids = PassIdRegistry::new();
    let produce = ids.id("produce");
    let consume = ids.id("consume");
    let readback = ids.id("readback");

    let mut graph = RenderGraph::new();
    let mut steady_command_count = None;
    for frame in 0..1000 {
        let slot = frame % core.command_sets.frames_in_flight();
        if frame % 2 == 0 {
            graph.add_pass(
                produce,
                move |builder| {
                    builder.write_as(h, ResourceState::CopyDest);
                    Ok(())
                },
                move |_pass, _ctx| Ok(()),
            );
            graph.add_pass(
                consume,
                move |builder| {
                    builder.read_as(h, ResourceState::CopySource);
                    builder.write_as(o, ResourceState::CopyDest);
                    Ok(())
                },
                move |_pass, _ctx| Ok(()),
            );
        } else {
            graph.add_pass(
                readback,
                move |builder| {
                    builder.read_as(o, ResourceState::CopySource);
                    Ok(())
                },
                move |_pass, _ctx| Ok(()),
            );
        }
        graph.compile().unwrap();
        run_frame(&mut core, &mut graph, slot).unwrap();
        graph.clear();

        assert_eq!(graph.pass_count(), 0);
        assert_eq!(graph.execution_order().count(), 0);

        // Steady-state frames record the same command stream; declarations do
        // not accumulate across cycles.
        if frame >= 2 && frame % 2 == 0 {
            let count = core.command_sets.set(slot).commands().len();
            match steady_command_count {
                None => steady_command_count = Some(count),
                Some(expected) => assert_eq!(count, expected),
            }
        }
    }
}
