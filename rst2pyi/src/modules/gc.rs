use crate::error::Result;
use crate::parser::{DefArgs, ModuleArgs, Rst2Pyi};

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("gc", "control the garbage collector")
            .post_doc("from typing import overload")
            .end("Functions"),
    )?;
    for (old, new) in [
        (".. function:: enable()", "def enable() -> None"),
        (".. function:: disable()", "def disable() -> None"),
        (".. function:: collect()", "def collect() -> None"),
        (".. function:: mem_alloc()", "def mem_alloc() -> int"),
        (".. function:: mem_free()", "def mem_free() -> int"),
    ] {
        shed.def_(DefArgs::new(old, new).indent(0))?;
    }
    shed.def_(
        DefArgs::new(
            ".. function:: threshold([amount])",
            ["def threshold() -> int", "def threshold(amount: int) -> None"],
        )
        .indent(0),
    )?;
    shed.write(false)?;
    Ok(())
}
