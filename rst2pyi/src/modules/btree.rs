use crate::error::Result;
use crate::model::VarKind;
use crate::parser::{ClassArgs, CommonDefsArgs, DefArgs, ModuleArgs, Rst2Pyi, VarsArgs};

const RANGE_SIGNATURE_TAIL: &str = r#"
   self,
   start_key: bytes | None = None,
   end_key: bytes | None = None,
   flags: int = 0,
   /
)"#;

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("btree", "simple BTree database")
            .post_doc(
                r#"
from typing import Any, Final, Iterable

from uio import IOBase
"#,
            )
            .end("Example::"),
    )?;
    let example = shed.extra_notes(Some("Functions"), "")?;
    shed.push_module_doc(example)?;

    shed.def_(
        DefArgs::new(
            ".. function:: open(stream, *, flags=0, pagesize=0, cachesize=0, minkeypage=0)",
            r#"
def open(
   stream: IOBase[bytes, Any],
   /,
   *,
   flags: int = 0,
   pagesize: int = 0,
   cachesize: int = 0,
   minkeypage: int = 0
) -> _BTree
"#,
        )
        .indent(0),
    )?;

    let close = ".. method:: btree.close()";
    let btree = shed.class_(ClassArgs::new("_BTree", close))?;
    shed.def_(DefArgs::new(close, "def close(self) -> None").class(btree))?;
    shed.def_(DefArgs::new(".. method:: btree.flush()", "def flush(self) -> None").class(btree))?;

    let iter = ".. method:: btree.__iter__()";
    shed.defs_with_common_description(
        CommonDefsArgs::new(
            ".. method:: btree.",
            [
                (
                    "__getitem__(key)",
                    "def __getitem__(self, key: bytes, /) -> bytes",
                ),
                (
                    "get(key, default=None, /)",
                    "def get(self, key: bytes, default: bytes | None = None, /) -> bytes | None",
                ),
                (
                    "__setitem__(key, val)",
                    "def __setitem__(self, key: bytes, val: bytes, /) -> None",
                ),
                (
                    "__delitem__(key)",
                    "def __delitem__(self, key: bytes, /) -> None",
                ),
                (
                    "__contains__(key)",
                    "def __contains__(self, key: bytes, /) -> bool",
                ),
            ],
        )
        .end(iter)
        .class(btree),
    )?;
    shed.def_(DefArgs::new(iter, "def __iter__(self) -> Iterable[bytes]").class(btree))?;

    let range = |name: &str, item: &str| {
        format!("def {}({} -> Iterable[{}]", name, RANGE_SIGNATURE_TAIL, item)
    };
    shed.defs_with_common_description(
        CommonDefsArgs::new(
            ".. method:: btree.",
            [
                ("keys([start_key, [end_key, [flags]]])", range("keys", "bytes")),
                ("values([start_key, [end_key, [flags]]])", range("values", "bytes")),
                (
                    "items([start_key, [end_key, [flags]]])",
                    range("items", "tuple[bytes, bytes]"),
                ),
            ],
        )
        .end("Constants")
        .class(btree),
    )?;

    shed.consume_header_line(true)?;
    shed.vars(VarsArgs::new(&[".. data:: INCL"]).kind(VarKind::Module))?;
    shed.vars(
        VarsArgs::new(&[".. data:: DESC"])
            .kind(VarKind::Module)
            .end(None),
    )?;
    shed.write(false)?;
    Ok(())
}
