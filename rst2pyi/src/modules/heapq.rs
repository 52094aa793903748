use crate::error::Result;
use crate::parser::{DefArgs, ModuleArgs, Rst2Pyi};

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("heapq", "heap queue algorithm")
            .post_doc(
                r#"
from typing import TypeVar, Any, Final

_T: Final = TypeVar("_T")
"#,
            )
            .end("Functions"),
    )?;
    shed.consume_header_line(true)?;
    shed.def_(
        DefArgs::new(
            ".. function:: heappush(heap, item)",
            "def heappush(heap: list[_T], item: _T, /) -> None",
        )
        .indent(0),
    )?;
    shed.def_(
        DefArgs::new(
            ".. function:: heappop(heap)",
            "def heappop(heap: list[_T], /) -> _T",
        )
        .indent(0),
    )?;
    shed.def_(
        DefArgs::new(
            ".. function:: heapify(x)",
            "def heapify(x: list[Any], /) -> None",
        )
        .indent(0),
    )?;
    shed.write(true)?;
    Ok(())
}
