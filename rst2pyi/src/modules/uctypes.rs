use crate::error::Result;
use crate::model::VarKind;
use crate::parser::{ClassArgs, DefArgs, ModuleArgs, Rst2Pyi, VarsArgs};

/// Structure descriptor types the page describes only in prose.
const DESCRIPTOR_ALIASES: &str = r#"
_ScalarProperty: Final = int
_RecursiveProperty: Final = Tuple[int, "_property"]
_ArrayProperty: Final = Tuple[int, int]
_ArrayOfAggregateProperty: Final = Tuple[int, int, "_property"]
_PointerToAPrimitiveProperty: Final = Tuple[int, int]
_PointerToAaAggregateProperty: Final = Tuple[int, "_property"]
_BitfieldProperty: Final = int
_property: Final = _ScalarProperty | _RecursiveProperty | _ArrayProperty | _ArrayOfAggregateProperty | _PointerToAPrimitiveProperty | _PointerToAaAggregateProperty | _BitfieldProperty
_descriptor: Final = Tuple[str, _property]
"#;

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("uctypes", "access binary data in a structured way")
            .post_doc(
                r#"
from typing import Tuple, TypeVar, Final

from uarray import array

_AnyReadableBuf: Final = TypeVar("_AnyReadableBuf", bytearray, array, memoryview, bytes)
"#,
            )
            .end("Module contents"),
    )?;
    shed.consume_header_line(true)?;

    let constructor = ".. class:: struct(addr, descriptor, layout_type=NATIVE, /)";
    let structure = shed.class_(
        ClassArgs::new("struct", constructor)
            .pre_str("# noinspection PyPep8Naming")
            .extra_docs(vec![
                "   A \"foreign data structure\" over the memory at a given address.".into(),
            ]),
    )?;
    shed.push_module_text(DESCRIPTOR_ALIASES)?;
    shed.def_(
        DefArgs::new(
            constructor,
            "def __init__(self, addr: int, descriptor: _descriptor, layout_type: int = NATIVE, /)",
        )
        .class(structure),
    )?;

    for layout in ["LITTLE_ENDIAN", "BIG_ENDIAN", "NATIVE"] {
        let old = format!(".. data:: {}", layout);
        shed.vars(VarsArgs::new(&[old]).kind(VarKind::Module))?;
    }

    shed.def_(
        DefArgs::new(
            ".. function:: sizeof(struct, layout_type=NATIVE, /)",
            "def sizeof(struct: struct | _descriptor, layout_type: int = NATIVE, /) -> int",
        )
        .pre_str("# noinspection PyShadowingNames")
        .indent(0),
    )?;
    for (old, new) in [
        (
            ".. function:: addressof(obj)",
            "def addressof(obj: _AnyReadableBuf, /) -> int",
        ),
        (
            ".. function:: bytes_at(addr, size)",
            "def bytes_at(addr: int, size: int, /) -> bytes",
        ),
        (
            ".. function:: bytearray_at(addr, size)",
            "def bytearray_at(addr: int, size: int, /) -> bytearray",
        ),
    ] {
        shed.def_(DefArgs::new(old, new).indent(0))?;
    }

    shed.vars(
        VarsArgs::new(&[
            ".. data:: UINT8",
            "INT8",
            "UINT16",
            "INT16",
            "UINT32",
            "INT32",
            "UINT64",
            "INT64",
        ])
        .kind(VarKind::Module),
    )?;
    shed.vars(VarsArgs::new(&[".. data:: FLOAT32", "FLOAT64"]).kind(VarKind::Module))?;
    shed.vars(VarsArgs::new(&[".. data:: VOID"]).kind(VarKind::Module))?;
    shed.vars(
        VarsArgs::new(&[".. data:: PTR", "ARRAY"])
            .kind(VarKind::Module)
            .end("Structure descriptors and instantiating structure objects"),
    )?;

    // The remaining sections explain descriptors in prose; nothing to declare.
    shed.extra_docs(0, None)?;
    shed.write(false)?;
    Ok(())
}
