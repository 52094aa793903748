use crate::error::Result;
use crate::parser::{ClassArgs, DefArgs, ModuleArgs, Rst2Pyi};

const DEQUE_PROTOCOL: &str = r#"
   def __bool__(self) -> bool:
      """
      Returns true if the `deque` isn't empty.

      **Note:** The method isn't listed by ``dir(deque)`` and can't be called directly,
      however ``bool(deque)`` and automatic conversion work!
      """

   def __len__(self) -> int:
      """
      Returns the number of items in the `deque`.

      **Note:** The method isn't listed by ``dir(deque)`` and can't be called directly,
      however ``len(deque)`` works!
      """
"#;

pub fn generate(shed: &mut Rst2Pyi) -> Result<()> {
    shed.module(
        ModuleArgs::new("collections", "collection and container types")
            .post_doc(
                r#"
from typing import overload, Any, Type, Iterable, TypeVar, Generic, Mapping, Dict, Final

_KT: Final = TypeVar("_KT")
_VT: Final = TypeVar("_VT")
"#,
            )
            .end("Classes"),
    )?;

    let deque = shed.class_(
        ClassArgs::new("deque", "Classes")
            .pre_str("# noinspection PyPep8Naming")
            .extra_docs(vec![
                "   Minimal implementation of a deque that implements a FIFO buffer.".into(),
            ]),
    )?;
    shed.def_(
        DefArgs::new(
            ".. function:: deque(iterable, maxlen[, flags])",
            "def __init__(self, iterable: tuple[Any], maxlen: int, flags: int = 0, /)",
        )
        .end("As well as supporting `bool` and `len`, deque objects have the following")
        .class(deque),
    )?;
    shed.push_class_text(deque, DEQUE_PROTOCOL)?;
    shed.consume_containing_line("methods:", true)?;
    shed.def_(
        DefArgs::new(
            ".. method:: deque.append(x)",
            "def append(self, x: Any, /) -> None",
        )
        .class(deque),
    )?;
    shed.def_(DefArgs::new(".. method:: deque.popleft()", "def popleft(self) -> Any").class(deque))?;

    shed.def_(
        DefArgs::new(
            ".. function:: namedtuple(name, fields)",
            "def namedtuple(name: str, fields: str | Iterable[str]) -> Type[tuple[Any, ...]]",
        )
        .indent(0),
    )?;

    let ordered_dict = shed.class_(
        ClassArgs::new("OrderedDict(Dict[_KT, _VT], Generic[_KT, _VT])", "..").extra_docs(vec![
            "   When ordered dict is iterated over, keys/items are returned in the order they were added."
                .into(),
        ]),
    )?;
    shed.def_(
        DefArgs::new(
            ".. function:: OrderedDict(...)",
            [
                "def __init__(self)",
                "def __init__(self, **kwargs: _VT)",
                "def __init__(self, map: Mapping[_KT, _VT], **kwargs: _VT)",
            ],
        )
        .class(ordered_dict),
    )?;

    shed.write(true)?;
    Ok(())
}
