use crate::error::Result;
use crate::parser::{ClassArgs, DefArgs, ModuleArgs, Rst2Pyi};

/// Special methods the page describes only in prose.
const OPERATORS: &str = r#"
   def __len__(self) -> int:
      """
      Returns the number of items in ``self``; called as ``len(a)``, where ``a`` is an ``array``.
      """

   @overload
   def __getitem__(self, index: int) -> _T:
      """
      Indexed read of ``self``; called as ``a[index]``, where ``a`` is an ``array``.
      """

   @overload
   def __getitem__(self, sl: slice) -> array[_T]:
      """
      Slice read of ``self``; called as ``a[sl]``, where ``a`` is an ``array``.
      """

   @overload
   def __setitem__(self, index: int, value: _T) -> None:
      """
      Indexed write into ``self``; called as ``a[index] = value``.
      """

   @overload
   def __setitem__(self, sl: slice, values: array[_T]) -> None:
      """
      Slice write into ``self``; called as ``a[sl] = values``.
      """

   def __add__(self, other: array[_T]) -> array[_T]:
      """
      Return a new ``array`` that is the concatenation of ``self`` with ``other``.
      """

   def __iadd__(self, other: array[_T]) -> None:
      """
      Concatenates ``self`` with ``other`` in-place; equivalent to ``extend(other)``.
      """

   def __repr__(self) -> str:
      """
      Returns the string ``array(<type>, [<elements>])``.
      """
"#;

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("array", "efficient arrays of numeric data")
            .post_doc(
                r#"
from typing import overload, Sequence, Any, MutableSequence, Generic, Text, TypeVar, Final

_T: Final = TypeVar("_T", int, float, Text)
"#,
            )
            .end("|see_cpython_module| :mod:`python:array`."),
    )?;
    let array = shed.class_(ClassArgs::new(
        "array(MutableSequence[_T], Generic[_T])",
        "Classes",
    ))?;
    shed.def_(
        DefArgs::new(
            ".. class:: array(typecode, [iterable])",
            [
                "def __init__(self, typecode: str, /)",
                "def __init__(self, typecode: str, iterable: Sequence[Any], /)",
            ],
        )
        .class(array),
    )?;
    shed.def_(
        DefArgs::new(
            "    .. method:: append(val)",
            "def append(self, val: Any, /) -> None",
        )
        .class(array),
    )?;
    shed.def_(
        DefArgs::new(
            "    .. method:: extend(iterable)",
            "def extend(self, iterable: Sequence[Any], /) -> None",
        )
        .class(array),
    )?;
    shed.push_class_text(array, OPERATORS)?;
    shed.write(true)?;
    Ok(())
}
